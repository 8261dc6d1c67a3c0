//! Perception system that combines multiple senses into brain inputs.

use super::body::Body;
use super::contact::FootContact;
use super::posture::Posture;
use super::rhythm::Rhythm;
use super::sense::{Sense, SenseContext};
use super::stretch::MuscleStretch;

/// Brain inputs produced by [`Perception::locomotion`].
pub const SENSOR_COUNT: usize = 13;

/// Ordered list of senses whose outputs are concatenated into one input
/// vector.
pub struct Perception {
    senses: Vec<Box<dyn Sense>>,
}

impl Perception {
    /// Creates a new perception system.
    ///
    /// # Arguments
    ///
    /// * `senses` - Boxed senses, queried in the order given
    pub fn new(senses: Vec<Box<dyn Sense>>) -> Self {
        Self { senses }
    }

    /// The walker's 13-element sensor layout:
    ///
    /// | index | input |
    /// |---|---|
    /// | 0 | torso height |
    /// | 1 | vertical velocity |
    /// | 2 | horizontal velocity |
    /// | 3 | `sin(time * cpg_frequency)` |
    /// | 4, 5 | left / right foot contact |
    /// | 6..=12 | muscle length ratios |
    pub fn locomotion(cpg_frequency: f32) -> Self {
        Self::new(vec![
            Box::new(Posture),
            Box::new(Rhythm::new(cpg_frequency)),
            Box::new(FootContact),
            Box::new(MuscleStretch),
        ])
    }

    /// Runs every sense and concatenates the results.
    ///
    /// # Arguments
    ///
    /// * `body` - The body doing the sensing
    /// * `ctx` - Read-only view of the world this tick
    ///
    /// # Returns
    ///
    /// All activations in sense order, ready for
    /// [`NeuralNetwork::predict`](super::super::brain::NeuralNetwork::predict).
    pub fn perceive(&self, body: &Body, ctx: &SenseContext<'_>) -> Vec<f32> {
        let mut inputs = Vec::with_capacity(self.total_input_size());
        for sense in &self.senses {
            let outputs = sense.sense(body, ctx);
            debug_assert_eq!(outputs.len(), sense.input_size(), "{}", sense.name());
            inputs.extend(outputs.iter().copied());
        }
        inputs
    }

    /// Sum of all senses' input sizes.
    pub fn total_input_size(&self) -> usize {
        self.senses.iter().map(|s| s.input_size()).sum()
    }

    /// Names of the senses in order.
    pub fn sense_names(&self) -> Vec<&'static str> {
        self.senses.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for Perception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perception")
            .field("senses", &self.sense_names())
            .finish()
    }
}
