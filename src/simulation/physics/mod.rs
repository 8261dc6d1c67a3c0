//! Soft-body physics: Verlet particles linked by distance constraints.
//!
//! Integration is position based. Constraints are relaxed iteratively in a
//! fixed order, and ground contact is resolved after every relaxation pass.

pub mod constraint;
pub mod particle;
pub mod world;

pub use constraint::Constraint;
pub use particle::Particle;
pub use world::PhysicsWorld;
