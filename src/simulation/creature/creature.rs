//! A single evolvable walker.

use log::{debug, warn};
use ndarray::Array1;

use super::super::brain::{NeuralNetwork, Topology};
use super::super::physics::PhysicsWorld;
use super::super::terrain::Terrain;
use super::body::{Body, Joint, MUSCLE_COUNT};
use super::perception::{Perception, SENSOR_COUNT};
use super::sense::SenseContext;

/// Brain topology matching the biped body for a given hidden width.
pub const fn locomotion_topology(hidden_nodes: usize) -> Topology {
    Topology::new(SENSOR_COUNT, hidden_nodes, MUSCLE_COUNT)
}

/// A brain bound to a body.
///
/// The brain survives across generations through reproduction; the body
/// only exists while the creature is embodied in the current
/// [`PhysicsWorld`] and is rebuilt from scratch every generation.
#[derive(Debug, Clone)]
pub struct Creature {
    /// Neural network controlling the muscles.
    pub brain: NeuralNetwork,
    /// Horizontal displacement of the torso from `start_x`, never negative.
    pub fitness: f32,
    /// Dead creatures skip cognition and are left out of the next world rebuild.
    pub alive: bool,
    /// Torso x position when the body was built.
    pub start_x: f32,
    /// Where the body is placed on every rebuild.
    pub spawn_x: f32,
    body: Option<Body>,
}

impl Creature {
    /// Creates a living, not yet embodied creature.
    pub fn new(brain: NeuralNetwork, spawn_x: f32) -> Self {
        Self {
            brain,
            fitness: 0.0,
            alive: true,
            start_x: spawn_x,
            spawn_x,
            body: None,
        }
    }

    /// The body inside the current world, if embodied.
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Builds a fresh body in `world` and records the starting position.
    pub fn embody(&mut self, world: &mut PhysicsWorld, terrain: &dyn Terrain) {
        let body = Body::build(world, terrain, self.spawn_x);
        self.start_x = body.particle(world, Joint::Torso).pos.x;
        self.body = Some(body);
    }

    /// Tears the body down and restores the start-of-generation state.
    pub fn reset(&mut self) {
        self.body = None;
        self.fitness = 0.0;
        self.alive = true;
        self.start_x = self.spawn_x;
    }

    /// Builds the sensor vector and runs the brain.
    ///
    /// Returns `None` when the creature has no body or the brain rejects
    /// the input vector; actuation is skipped for that tick.
    pub fn decide(&self, perception: &Perception, ctx: &SenseContext<'_>) -> Option<Array1<f32>> {
        let body = self.body.as_ref()?;
        let sensors = perception.perceive(body, ctx);
        let outputs = self.brain.predict(&sensors);
        if outputs.is_none() {
            debug!(
                "brain expects {} inputs, perception produced {}; skipping actuation",
                self.brain.input_nodes(),
                sensors.len()
            );
        }
        outputs
    }

    /// Applies brain output `i` to muscle `i`.
    pub fn actuate(&self, world: &mut PhysicsWorld, outputs: &Array1<f32>) {
        let Some(body) = &self.body else {
            return;
        };
        for (&muscle, &signal) in body.muscle_indices().iter().zip(outputs.iter()) {
            world.constraints[muscle].contract(signal);
        }
    }

    /// Senses, thinks and actuates in one go.
    ///
    /// Returns `true` if the muscles were driven this tick.
    pub fn think(
        &self,
        perception: &Perception,
        world: &mut PhysicsWorld,
        terrain: &dyn Terrain,
        time: f32,
    ) -> bool {
        let ctx = SenseContext {
            world: &*world,
            terrain,
            time,
        };
        match self.decide(perception, &ctx) {
            Some(outputs) => {
                self.actuate(world, &outputs);
                true
            }
            None => false,
        }
    }

    /// Recomputes fitness from the torso's current position.
    ///
    /// This is instantaneous displacement, not a running maximum: walking
    /// back toward the start lowers the fitness again.
    pub fn update_fitness(&mut self, world: &PhysicsWorld) {
        let Some(body) = &self.body else {
            return;
        };
        let x = body.particle(world, Joint::Torso).pos.x;
        if x.is_finite() {
            self.fitness = (x - self.start_x).max(0.0);
        } else {
            self.fitness = 0.0;
        }
    }

    /// Retires the creature if any of its particles became non-finite.
    ///
    /// Returns `false` when the creature is (now) dead.
    pub fn check_health(&mut self, world: &PhysicsWorld) -> bool {
        if !self.alive {
            return false;
        }
        if let Some(body) = &self.body {
            if !body.is_finite(world) {
                warn!("creature body diverged; retiring it for the rest of the generation");
                self.alive = false;
                self.fitness = 0.0;
            }
        }
        self.alive
    }
}
