//! Abstract sense trait for creature perception.
//!
//! Senses read a creature's body state from the physics world and convert
//! it into neural network inputs.

use ndarray::Array1;

use super::super::physics::PhysicsWorld;
use super::super::terrain::Terrain;
use super::body::Body;

/// Read-only view of the environment handed to every sense.
#[derive(Clone, Copy)]
pub struct SenseContext<'a> {
    /// Current physics state.
    pub world: &'a PhysicsWorld,
    /// Ground height function.
    pub terrain: &'a dyn Terrain,
    /// Seconds elapsed in the current generation.
    pub time: f32,
}

/// A sensory modality that contributes a fixed number of brain inputs.
pub trait Sense: Send + Sync {
    /// Produces this sense's activations for `body`.
    ///
    /// # Arguments
    ///
    /// * `body` - The body doing the sensing
    /// * `ctx` - The world, terrain and clock shared by every creature this tick
    ///
    /// # Returns
    ///
    /// A 1D array of exactly [`Sense::input_size`] activations.
    fn sense(&self, body: &Body, ctx: &SenseContext<'_>) -> Array1<f32>;

    /// Returns the number of neural network inputs this sense produces.
    ///
    /// # Returns
    ///
    /// The length of the array returned by `sense()`.
    fn input_size(&self) -> usize;

    /// Returns a human-readable name for this sense.
    fn name(&self) -> &'static str;
}
