//! # Evo Walkers - Neuroevolution of Soft-Body Locomotion
//!
//! A population of two-legged soft-body creatures learns to walk. Each
//! creature is a Verlet particle/constraint skeleton whose muscles are
//! driven by a small feedforward neural network; a genetic algorithm
//! evolves the network weights generation by generation to maximize
//! horizontal travel distance.
//!
//! ## Features
//!
//! - Position-based Verlet physics with iterative constraint relaxation
//! - Ground collision with velocity-history friction on arbitrary terrain
//! - Neural network brains (13-8-7 MLP with tanh activation)
//! - Genetic algorithm (roulette selection, uniform crossover, elitism)
//! - Parallel per-creature cognition with rayon
//! - Seedable, reproducible randomness
//! - Validated JSON genomes for saving and loading the best walker
//!
//! ## Core Modules
//!
//! - [`simulation::physics`] - Particles, constraints and the physics world
//! - [`simulation::brain`] - Neural network and genome
//! - [`simulation::creature`] - Body layout, senses and the creature itself
//! - [`simulation::population`] - Selection, crossover and mutation
//! - [`simulation::driver`] - Fixed-timestep generation loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural network implementation for creature brains.
    pub mod brain;
    /// Biped creatures, their senses and their bodies.
    pub mod creature;
    /// Generation loop that owns the population and the world.
    pub mod driver;
    /// Error type for configuration and genome exchange.
    pub mod error;
    /// Simulation parameters.
    pub mod params;
    /// Verlet particles, distance constraints and the physics world.
    pub mod physics;
    /// Population and genetic algorithm.
    pub mod population;
    /// Read-only render snapshots.
    pub mod snapshot;
    /// Per-generation fitness statistics.
    pub mod stats;
    /// Ground height functions.
    pub mod terrain;
    /// 2D vector math.
    pub mod vector;
}
