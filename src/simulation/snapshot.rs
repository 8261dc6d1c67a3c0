//! Read-only view of the simulation for renderers.
//!
//! Renderers never touch the live state; they receive a copy of what they
//! need to draw particles, constraints colored by tension, and the best
//! creature's brain.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::brain::NeuralNetwork;
use super::physics::PhysicsWorld;
use super::vector::Vector2;

/// Drawable state of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    /// Current position.
    pub pos: Vector2,
    /// Previous position (for motion blur or velocity arrows).
    pub old_pos: Vector2,
    /// Collision radius.
    pub radius: f32,
}

/// Drawable state of one constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintView {
    /// First endpoint position.
    pub p1: Vector2,
    /// Second endpoint position.
    pub p2: Vector2,
    /// Actuated constraint.
    pub is_muscle: bool,
    /// Length the solver targets right now.
    pub current_length: f32,
    /// Neutral length.
    pub base_length: f32,
}

impl ConstraintView {
    /// Signed tension in `[-0.3, 0.3]` for muscles: positive when stretched
    /// past the neutral length.
    pub fn tension(&self) -> f32 {
        if self.base_length > 0.0 {
            self.current_length / self.base_length - 1.0
        } else {
            0.0
        }
    }
}

/// Weights of one brain for visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainView {
    /// Number of input nodes.
    pub input_nodes: usize,
    /// Number of hidden nodes.
    pub hidden_nodes: usize,
    /// Number of output nodes.
    pub output_nodes: usize,
    /// `weights_ih[i][j]`: input `i` to hidden `j`.
    pub weights_ih: Vec<Vec<f32>>,
    /// `weights_ho[j][k]`: hidden `j` to output `k`.
    pub weights_ho: Vec<Vec<f32>>,
}

impl From<&NeuralNetwork> for BrainView {
    fn from(brain: &NeuralNetwork) -> Self {
        fn rows(m: &Array2<f32>) -> Vec<Vec<f32>> {
            m.rows().into_iter().map(|r| r.to_vec()).collect()
        }

        Self {
            input_nodes: brain.input_nodes(),
            hidden_nodes: brain.hidden_nodes(),
            output_nodes: brain.output_nodes(),
            weights_ih: rows(brain.weights_ih()),
            weights_ho: rows(brain.weights_ho()),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current generation.
    pub generation: u32,
    /// Substeps elapsed in the current generation.
    pub timer: u32,
    /// Fitness of the current leader.
    pub best_fitness: f32,
    /// Horizontal torso position of the current leader, for camera follow.
    pub leader_x: Option<f32>,
    /// All particles in the world.
    pub particles: Vec<ParticleView>,
    /// All constraints in the world.
    pub constraints: Vec<ConstraintView>,
    /// Brain of the current leader.
    pub best_brain: Option<BrainView>,
}

impl Snapshot {
    /// Copies the drawable parts of `world`.
    pub(crate) fn capture_world(world: &PhysicsWorld) -> (Vec<ParticleView>, Vec<ConstraintView>) {
        let particles = world
            .particles
            .iter()
            .map(|p| ParticleView {
                pos: p.pos,
                old_pos: p.old_pos,
                radius: p.radius,
            })
            .collect();

        let constraints = world
            .constraints
            .iter()
            .map(|c| ConstraintView {
                p1: world.particles[c.p1].pos,
                p2: world.particles[c.p2].pos,
                is_muscle: c.is_muscle,
                current_length: c.current_length,
                base_length: c.base_length,
            })
            .collect();

        (particles, constraints)
    }
}
