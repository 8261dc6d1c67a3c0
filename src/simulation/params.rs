//! Simulation parameters.
//!
//! One plain struct covers the physics, the brains and the genetic
//! algorithm. It loads from JSON with every missing field taking its
//! default, and is validated before a [`Simulation`](super::driver::Simulation)
//! accepts it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::SimulationError;
use super::population::Breeding;
use super::terrain::RollingHills;
use super::vector::Vector2;

/// Simulation parameters that control the physics, the brains and the
/// genetic algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Creatures per generation. Applied on the next `reset`.
    pub population_size: usize,
    /// Width of the brain's hidden layer.
    pub hidden_nodes: usize,
    /// Per-weight probability of mutation for offspring.
    pub mutation_rate: f32,
    /// Half-width of the uniform mutation delta.
    pub mutation_strength: f32,
    /// Per-weight mutation probability used by `clone_best` and `load_best`.
    pub clone_mutation_rate: f32,
    /// Best genomes carried over unmutated each generation.
    pub elite_count: usize,
    /// Physics substeps per external tick.
    pub sim_speed: usize,
    /// Physics substeps per external tick while warp is on.
    pub warp_speed: usize,
    /// Substeps per generation.
    pub generation_duration: u32,
    /// Fixed physics timestep in seconds.
    pub dt: f32,
    /// Gravitational acceleration (`+y` is down).
    pub gravity: Vector2,
    /// Constraint relaxation passes per substep.
    pub relaxation_iterations: usize,
    /// Horizontal spawn position of every creature.
    pub spawn_x: f32,
    /// Angular frequency of the central pattern generator (rad/s).
    pub cpg_frequency: f32,
    /// Shape of the default terrain.
    pub terrain: RollingHills,
    /// Seed for the random number generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 20,
            hidden_nodes: 8,
            mutation_rate: 0.1,
            mutation_strength: 0.5,
            clone_mutation_rate: 0.05,
            elite_count: 1,
            sim_speed: 1,
            warp_speed: 25,
            generation_duration: 600,
            dt: 0.016,
            gravity: Vector2::new(0.0, 980.0),
            relaxation_iterations: 5,
            spawn_x: 0.0,
            cpg_frequency: 6.0,
            terrain: RollingHills::default(),
            seed: None,
        }
    }
}

impl Params {
    /// Checks every field for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> SimulationError {
            SimulationError::InvalidParam {
                name,
                reason: reason.into(),
            }
        }

        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if self.hidden_nodes == 0 {
            return Err(invalid("hidden_nodes", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate", format!("{} is outside [0, 1]", self.mutation_rate)));
        }
        if !(0.0..=1.0).contains(&self.clone_mutation_rate) {
            return Err(invalid(
                "clone_mutation_rate",
                format!("{} is outside [0, 1]", self.clone_mutation_rate),
            ));
        }
        if !self.mutation_strength.is_finite() || self.mutation_strength < 0.0 {
            return Err(invalid("mutation_strength", "must be finite and non-negative"));
        }
        if self.elite_count > self.population_size {
            return Err(invalid(
                "elite_count",
                format!("{} exceeds population_size {}", self.elite_count, self.population_size),
            ));
        }
        if self.sim_speed == 0 {
            return Err(invalid("sim_speed", "must be at least 1"));
        }
        if self.warp_speed == 0 {
            return Err(invalid("warp_speed", "must be at least 1"));
        }
        if self.generation_duration == 0 {
            return Err(invalid("generation_duration", "must be at least 1 frame"));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(invalid("dt", "must be finite and positive"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", "must be finite"));
        }
        // Ground contact is only resolved inside relaxation passes.
        if self.relaxation_iterations == 0 {
            return Err(invalid("relaxation_iterations", "must be at least 1"));
        }
        if !self.spawn_x.is_finite() {
            return Err(invalid("spawn_x", "must be finite"));
        }
        if !self.cpg_frequency.is_finite() {
            return Err(invalid("cpg_frequency", "must be finite"));
        }
        self.validate_terrain()
    }

    fn validate_terrain(&self) -> Result<(), SimulationError> {
        let t = &self.terrain;
        let fields = [
            t.base_level,
            t.flat_radius,
            t.ramp_width,
            t.amplitude_long,
            t.wavelength_long,
            t.amplitude_short,
            t.wavelength_short,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::InvalidParam {
                name: "terrain",
                reason: "every field must be finite".into(),
            });
        }
        if t.wavelength_long <= 0.0 || t.wavelength_short <= 0.0 {
            return Err(SimulationError::InvalidParam {
                name: "terrain",
                reason: "wavelengths must be positive".into(),
            });
        }
        Ok(())
    }

    /// Genetic algorithm settings for [`Population::evolve`](super::population::Population::evolve).
    pub fn breeding(&self) -> Breeding {
        Breeding {
            mutation_rate: self.mutation_rate,
            mutation_strength: self.mutation_strength,
            elite_count: self.elite_count,
        }
    }

    /// Reads parameters from JSON. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Writes parameters as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
