//! Container that integrates particles and relaxes constraints.

use serde::{Deserialize, Serialize};

use super::super::terrain::Terrain;
use super::super::vector::Vector2;
use super::constraint::Constraint;
use super::particle::Particle;

/// Default number of relaxation passes per update.
pub const DEFAULT_ITERATIONS: usize = 5;

/// All particles and constraints taking part in the current generation.
///
/// The world does not outlive a generation: the driver clears it and
/// rebuilds it from the living creatures whenever a new generation starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsWorld {
    /// Every simulated particle.
    pub particles: Vec<Particle>,
    /// Every constraint, resolved in insertion order.
    pub constraints: Vec<Constraint>,
    /// Gravitational acceleration.
    pub gravity: Vector2,
    /// Relaxation passes per update.
    pub iterations: usize,
}

impl PhysicsWorld {
    /// Creates an empty world.
    pub fn new(gravity: Vector2, iterations: usize) -> Self {
        Self {
            particles: Vec::new(),
            constraints: Vec::new(),
            gravity,
            iterations,
        }
    }

    /// Removes all particles and constraints.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.constraints.clear();
    }

    /// Adds a particle and returns its index.
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Adds a constraint and returns its index.
    pub fn add_constraint(&mut self, constraint: Constraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Advances the world by `dt`.
    ///
    /// Gravity is applied as a force, every particle is integrated, then
    /// `iterations` relaxation passes run. Each pass resolves every
    /// constraint once and then clamps every particle against the ground,
    /// because a constraint correction can push a particle back underground.
    pub fn update(&mut self, dt: f32, terrain: &dyn Terrain) {
        let gravity = self.gravity;
        for particle in &mut self.particles {
            particle.apply_force(gravity.scale(particle.mass));
            particle.update(dt);
        }

        for _ in 0..self.iterations {
            self.relax(terrain);
        }
    }

    /// One Gauss-Seidel pass over all constraints followed by ground clamping.
    pub fn relax(&mut self, terrain: &dyn Terrain) {
        for constraint in &self.constraints {
            constraint.update(&mut self.particles);
        }
        for particle in &mut self.particles {
            particle.constrain(terrain);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vector2::new(0.0, 980.0), DEFAULT_ITERATIONS)
    }
}
