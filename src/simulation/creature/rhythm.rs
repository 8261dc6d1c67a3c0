//! Central pattern generator: a clock signal independent of body state.

use ndarray::Array1;

use super::body::Body;
use super::sense::{Sense, SenseContext};

/// Emits `sin(time * frequency)`.
pub struct Rhythm {
    /// Angular frequency in radians per second.
    pub frequency: f32,
}

impl Rhythm {
    /// Creates an oscillator with the given angular frequency.
    pub fn new(frequency: f32) -> Self {
        Self { frequency }
    }
}

impl Sense for Rhythm {
    fn sense(&self, _body: &Body, ctx: &SenseContext<'_>) -> Array1<f32> {
        Array1::from_elem(1, (ctx.time * self.frequency).sin())
    }

    fn input_size(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Rhythm"
    }
}
