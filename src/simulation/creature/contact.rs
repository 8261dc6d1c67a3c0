//! Foot contact sense.

use ndarray::Array1;

use super::body::{Body, Joint};
use super::sense::{Sense, SenseContext};

/// A foot counts as grounded when its lowest point is within this distance
/// of the ground.
pub const CONTACT_TOLERANCE: f32 = 2.0;

/// Outputs `1.0` or `0.0` for the left foot, then the right foot.
pub struct FootContact;

impl FootContact {
    fn grounded(body: &Body, ctx: &SenseContext<'_>, foot: Joint) -> f32 {
        let particle = body.particle(ctx.world, foot);
        let ground = ctx.terrain.height(particle.pos.x);
        if particle.pos.y + particle.radius >= ground - CONTACT_TOLERANCE {
            1.0
        } else {
            0.0
        }
    }
}

impl Sense for FootContact {
    fn sense(&self, body: &Body, ctx: &SenseContext<'_>) -> Array1<f32> {
        Array1::from_vec(vec![
            Self::grounded(body, ctx, Joint::FootLeft),
            Self::grounded(body, ctx, Joint::FootRight),
        ])
    }

    fn input_size(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "FootContact"
    }
}
