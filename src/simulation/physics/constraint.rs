//! Distance constraints: rigid bones and actuated muscles.

use serde::{Deserialize, Serialize};

use super::particle::Particle;

/// Stiffness of a rigid bone.
pub const BONE_STIFFNESS: f32 = 1.0;
/// Stiffness of an actuated muscle.
pub const MUSCLE_STIFFNESS: f32 = 0.5;
/// Maximum fractional stretch or squeeze of a muscle.
pub const MUSCLE_RANGE: f32 = 0.3;
/// Weight kept from the previous muscle length on each `contract` call.
pub const MUSCLE_SMOOTHING: f32 = 0.9;

/// A distance link between two particles of a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Endpoints are indices into the world's particle list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// First endpoint.
    pub p1: usize,
    /// Second endpoint.
    pub p2: usize,
    /// Length at construction time.
    pub rest_length: f32,
    /// Length the solver currently targets. Muscles change it over time.
    pub current_length: f32,
    /// Fraction of the error corrected per relaxation pass, in `(0, 1]`.
    pub stiffness: f32,
    /// Actuated constraint.
    pub is_muscle: bool,
    /// Neutral length used as the reference for actuation.
    pub base_length: f32,
}

impl Constraint {
    /// Creates a rigid bone whose length is the current endpoint distance.
    pub fn bone(particles: &[Particle], p1: usize, p2: usize) -> Self {
        Self::between(particles, p1, p2, BONE_STIFFNESS, false)
    }

    /// Creates a muscle whose neutral length is the current endpoint distance.
    pub fn muscle(particles: &[Particle], p1: usize, p2: usize) -> Self {
        Self::between(particles, p1, p2, MUSCLE_STIFFNESS, true)
    }

    /// Creates a constraint with an explicit rest length.
    pub fn with_length(p1: usize, p2: usize, length: f32, stiffness: f32, is_muscle: bool) -> Self {
        Self {
            p1,
            p2,
            rest_length: length,
            current_length: length,
            stiffness: stiffness.clamp(f32::EPSILON, 1.0),
            is_muscle,
            base_length: length,
        }
    }

    fn between(particles: &[Particle], p1: usize, p2: usize, stiffness: f32, is_muscle: bool) -> Self {
        let length = particles[p1].pos.distance(particles[p2].pos);
        Self::with_length(p1, p2, length, stiffness, is_muscle)
    }

    /// Current length relative to the rest length.
    pub fn stretch_ratio(&self) -> f32 {
        if self.rest_length > 0.0 {
            self.current_length / self.rest_length
        } else {
            1.0
        }
    }

    /// Runs one position-based relaxation pass on this constraint.
    ///
    /// Coincident endpoints are skipped since the correction direction is
    /// undefined.
    pub fn update(&self, particles: &mut [Particle]) {
        let (a, b) = (&particles[self.p1], &particles[self.p2]);
        let delta = b.pos - a.pos;
        let dist = delta.length();
        if dist == 0.0 || !dist.is_finite() {
            return;
        }

        let diff = (dist - self.current_length) / dist;
        let offset = delta.scale(diff * 0.5 * self.stiffness);
        let (a_fixed, b_fixed) = (a.fixed, b.fixed);

        if !a_fixed {
            particles[self.p1].pos += offset;
        }
        if !b_fixed {
            particles[self.p2].pos -= offset;
        }
    }

    /// Drives a muscle toward `base_length * (1 + 0.3 * signal)`.
    ///
    /// The signal is clamped to `[-1, 1]` and the length follows the target
    /// through an exponential low-pass filter, so the length always stays
    /// within `[0.7, 1.3] * base_length`.
    pub fn contract(&mut self, signal: f32) {
        let signal = if signal.is_nan() { 0.0 } else { signal.clamp(-1.0, 1.0) };
        let target = self.base_length * (1.0 + MUSCLE_RANGE * signal);
        self.current_length =
            MUSCLE_SMOOTHING * self.current_length + (1.0 - MUSCLE_SMOOTHING) * target;
    }
}
