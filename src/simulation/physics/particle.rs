//! Verlet point masses.

use serde::{Deserialize, Serialize};

use super::super::terrain::Terrain;
use super::super::vector::Vector2;

/// Default collision radius for body particles.
pub const DEFAULT_RADIUS: f32 = 5.0;
/// Default per-tick velocity retention in free flight.
pub const DEFAULT_AIR_FRICTION: f32 = 0.99;
/// Default horizontal velocity retention while touching the ground.
pub const DEFAULT_GROUND_FRICTION: f32 = 0.8;

/// A point mass integrated with position Verlet.
///
/// Velocity is never stored; it is implied by `pos - old_pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current position.
    pub pos: Vector2,
    /// Position at the previous tick.
    pub old_pos: Vector2,
    /// Accumulated acceleration, cleared after every integration.
    pub acceleration: Vector2,
    /// Mass used to turn forces into acceleration.
    pub mass: f32,
    /// Pinned particles are never moved by integration, constraints or ground.
    pub fixed: bool,
    /// Collision radius against the ground.
    pub radius: f32,
    /// Velocity damping applied every integration step (< 1).
    pub air_friction: f32,
    /// Horizontal velocity damping applied on ground contact (< 1).
    pub ground_friction: f32,
}

impl Particle {
    /// Creates a free particle at rest with default material settings.
    pub fn new(pos: Vector2, mass: f32) -> Self {
        Self {
            pos,
            old_pos: pos,
            acceleration: Vector2::ZERO,
            mass,
            fixed: false,
            radius: DEFAULT_RADIUS,
            air_friction: DEFAULT_AIR_FRICTION,
            ground_friction: DEFAULT_GROUND_FRICTION,
        }
    }

    /// Sets the collision radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the ground friction.
    pub fn with_ground_friction(mut self, ground_friction: f32) -> Self {
        self.ground_friction = ground_friction;
        self
    }

    /// Pins the particle in place.
    pub fn pinned(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Implicit velocity for the last tick.
    pub fn velocity(&self) -> Vector2 {
        self.pos - self.old_pos
    }

    /// Accumulates a force for the next integration step.
    pub fn apply_force(&mut self, force: Vector2) {
        if self.fixed || self.mass <= 0.0 {
            return;
        }
        self.acceleration += force.scale(1.0 / self.mass);
    }

    /// Advances the particle by one Verlet step.
    pub fn update(&mut self, dt: f32) {
        if self.fixed {
            return;
        }

        let velocity = self.velocity().scale(self.air_friction);
        self.old_pos = self.pos;
        self.pos += velocity + self.acceleration.scale(dt * dt);
        self.acceleration = Vector2::ZERO;
    }

    /// Pushes the particle out of the ground and applies ground friction.
    ///
    /// Friction works on the velocity history: the horizontal component of
    /// `old_pos` is rewritten so the damped velocity carries into the next
    /// integration step.
    pub fn constrain(&mut self, terrain: &dyn Terrain) {
        if self.fixed {
            return;
        }

        let ground = terrain.height(self.pos.x);
        if self.pos.y + self.radius > ground {
            self.pos.y = ground - self.radius;
            let vx = (self.pos.x - self.old_pos.x) * self.ground_friction;
            self.old_pos.x = self.pos.x - vx;
        }
    }
}
