//! Posture sense: how high the torso rides and how fast it moves.

use ndarray::Array1;

use super::body::{BODY_SCALE, Body, Joint};
use super::sense::{Sense, SenseContext};

/// Torso height above ground is divided by this to land near `[0, 1]`.
pub const HEIGHT_NORMALIZER: f32 = 4.0 * BODY_SCALE;
/// Per-tick torso displacement is multiplied by this.
pub const VELOCITY_SCALE: f32 = 0.1;

/// Outputs:
/// - normalized torso height above the ground directly below it
/// - scaled vertical velocity (`pos.y - old_pos.y`)
/// - scaled horizontal velocity (`pos.x - old_pos.x`)
pub struct Posture;

impl Sense for Posture {
    fn sense(&self, body: &Body, ctx: &SenseContext<'_>) -> Array1<f32> {
        let torso = body.particle(ctx.world, Joint::Torso);
        let height = (ctx.terrain.height(torso.pos.x) - torso.pos.y) / HEIGHT_NORMALIZER;
        let velocity = torso.velocity();

        Array1::from_vec(vec![
            height,
            velocity.y * VELOCITY_SCALE,
            velocity.x * VELOCITY_SCALE,
        ])
    }

    fn input_size(&self) -> usize {
        3
    }

    fn name(&self) -> &'static str {
        "Posture"
    }
}
