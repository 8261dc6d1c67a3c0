//! Muscle proprioception: each muscle's current length over its rest length.

use ndarray::Array1;

use super::body::{Body, MUSCLE_COUNT};
use super::sense::{Sense, SenseContext};

/// One ratio per muscle, in brain output order.
pub struct MuscleStretch;

impl Sense for MuscleStretch {
    fn sense(&self, body: &Body, ctx: &SenseContext<'_>) -> Array1<f32> {
        body.muscles(ctx.world).map(|m| m.stretch_ratio()).collect()
    }

    fn input_size(&self) -> usize {
        MUSCLE_COUNT
    }

    fn name(&self) -> &'static str {
        "MuscleStretch"
    }
}
