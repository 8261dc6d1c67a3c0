//! Fixed-timestep driver that runs generations of walkers.
//!
//! One external tick runs `sim_speed` (or `warp_speed`) physics substeps.
//! Each substep:
//! 1. builds the world from the living creatures if a generation starts
//!    without bodies (after construction or `reset`)
//! 2. senses and runs every brain in parallel against a frozen world
//! 3. applies muscle signals and refreshes fitness serially
//! 4. integrates the world and relaxes constraints
//! 5. advances the generation timer and evolves the population on expiry

use log::{debug, info};
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use super::brain::{Genome, NeuralNetwork};
use super::creature::{Creature, Joint, Perception, SenseContext, locomotion_topology};
use super::error::SimulationError;
use super::params::Params;
use super::physics::PhysicsWorld;
use super::population::Population;
use super::snapshot::{BrainView, Snapshot};
use super::stats::{EvolutionHistory, GenerationSummary};
use super::terrain::Terrain;

/// What happened during one call to [`Simulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Physics substeps executed.
    pub substeps: usize,
    /// Generations that finished during this tick, oldest first.
    pub completed: Vec<GenerationSummary>,
    /// Creatures retired because their body diverged.
    pub retired: usize,
    /// Creature substeps on which no muscle signal was produced.
    pub skipped_actuations: usize,
}

impl StepReport {
    /// `true` if at least one generation ended during the tick.
    pub fn generation_completed(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// The whole simulation: population, physics world, terrain and clock.
///
/// Owned by the caller; there is no global state.
pub struct Simulation {
    params: Params,
    population: Population,
    world: PhysicsWorld,
    terrain: Box<dyn Terrain>,
    perception: Perception,
    rng: StdRng,
    timer: u32,
    warp: bool,
    history: EvolutionHistory,
    champion: Option<(f32, Genome)>,
}

impl Simulation {
    /// Creates a simulation on the rolling-hills terrain described by `params`.
    pub fn new(params: Params) -> Result<Self, SimulationError> {
        let terrain = params.terrain;
        Self::with_terrain(params, terrain)
    }

    /// Creates a simulation on a custom terrain.
    pub fn with_terrain(params: Params, terrain: impl Terrain + 'static) -> Result<Self, SimulationError> {
        params.validate()?;

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut sim = Self {
            population: Population::new(params.population_size, params.spawn_x),
            world: PhysicsWorld::new(params.gravity, params.relaxation_iterations),
            terrain: Box::new(terrain),
            perception: Perception::locomotion(params.cpg_frequency),
            rng,
            timer: 0,
            warp: false,
            history: EvolutionHistory::default(),
            champion: None,
            params,
        };
        sim.population
            .init(locomotion_topology(sim.params.hidden_nodes), &mut sim.rng);
        Ok(sim)
    }

    /// Current parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The creatures of the current generation.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Live physics state.
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Ground height function.
    pub fn terrain(&self) -> &dyn Terrain {
        self.terrain.as_ref()
    }

    /// Recent generation summaries.
    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Current generation number.
    pub fn generation(&self) -> u32 {
        self.population.generation
    }

    /// Substeps elapsed in the current generation.
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Seconds elapsed in the current generation.
    pub fn elapsed(&self) -> f32 {
        self.timer as f32 * self.params.dt
    }

    /// Whether warp speed is on.
    pub fn is_warping(&self) -> bool {
        self.warp
    }

    /// Substeps run by the next call to [`Simulation::step`].
    pub fn substeps_per_tick(&self) -> usize {
        if self.warp {
            self.params.warp_speed
        } else {
            self.params.sim_speed
        }
    }

    /// Sets the number of substeps per tick (at least 1).
    pub fn set_sim_speed(&mut self, sim_speed: usize) {
        self.params.sim_speed = sim_speed.max(1);
    }

    /// Sets the offspring mutation rate, clamped to `[0, 1]`.
    pub fn set_mutation_rate(&mut self, mutation_rate: f32) {
        self.params.mutation_rate = if mutation_rate.is_nan() {
            0.0
        } else {
            mutation_rate.clamp(0.0, 1.0)
        };
    }

    /// Sets the population size used by the next [`Simulation::reset`].
    ///
    /// The running generation keeps its current size.
    pub fn set_population_size(&mut self, size: usize) {
        self.params.population_size = size.max(1);
        self.params.elite_count = self.params.elite_count.min(self.params.population_size);
    }

    /// Flips warp speed and returns the new state.
    pub fn toggle_warp(&mut self) -> bool {
        self.warp = !self.warp;
        info!(
            "warp {}: {} substeps per tick",
            if self.warp { "on" } else { "off" },
            self.substeps_per_tick()
        );
        self.warp
    }

    /// Advances the simulation by one external tick.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        for _ in 0..self.substeps_per_tick() {
            self.substep(&mut report);
        }
        report
    }

    fn substep(&mut self, report: &mut StepReport) {
        if self.timer == 0 && self.needs_rebuild() {
            self.rebuild_world();
        }

        let time = self.elapsed();
        let decisions: Vec<Option<Array1<f32>>> = {
            let ctx = SenseContext {
                world: &self.world,
                terrain: self.terrain.as_ref(),
                time,
            };
            let perception = &self.perception;
            self.population
                .creatures
                .par_iter()
                .map(|creature| {
                    if creature.alive {
                        creature.decide(perception, &ctx)
                    } else {
                        None
                    }
                })
                .collect()
        };

        for (creature, decision) in self.population.creatures.iter_mut().zip(decisions) {
            if !creature.alive {
                continue;
            }
            match decision {
                Some(outputs) => creature.actuate(&mut self.world, &outputs),
                None => report.skipped_actuations += 1,
            }
            creature.update_fitness(&self.world);
        }

        self.world.update(self.params.dt, self.terrain.as_ref());

        for creature in &mut self.population.creatures {
            if creature.alive && !creature.check_health(&self.world) {
                report.retired += 1;
            }
        }

        report.substeps += 1;
        self.timer += 1;
        if self.timer >= self.params.generation_duration {
            let summary = self.evolve();
            report.completed.push(summary);
        }
    }

    fn evolve(&mut self) -> GenerationSummary {
        if let Some(best) = self.population.best() {
            if self.champion.as_ref().is_none_or(|(f, _)| best.fitness > *f) {
                self.champion = Some((best.fitness, best.brain.to_genome()));
            }
        }

        let summary = self
            .population
            .evolve(self.params.breeding(), &mut self.rng);
        self.history.record(summary);
        self.timer = 0;
        self.rebuild_world();

        info!(
            "generation {} done: best {:.1}, mean {:.1}, {} alive",
            summary.generation, summary.best_fitness, summary.mean_fitness, summary.alive
        );
        summary
    }

    fn needs_rebuild(&self) -> bool {
        self.population
            .creatures
            .iter()
            .any(|c| c.alive && c.body().is_none())
    }

    /// Clears the world and rebuilds it from every living creature.
    fn rebuild_world(&mut self) {
        self.world.clear();
        let mut embodied = 0;
        for creature in &mut self.population.creatures {
            if creature.alive {
                creature.embody(&mut self.world, self.terrain.as_ref());
                embodied += 1;
            }
        }
        debug!(
            "generation {}: world rebuilt with {} creatures ({} particles, {} constraints)",
            self.population.generation,
            embodied,
            self.world.particles.len(),
            self.world.constraints.len()
        );
    }

    /// Starts over with a fresh random population of `params.population_size`.
    pub fn reset(&mut self) {
        self.population = Population::new(self.params.population_size, self.params.spawn_x);
        self.population
            .init(locomotion_topology(self.params.hidden_nodes), &mut self.rng);
        self.world.clear();
        self.history.clear();
        self.champion = None;
        self.timer = 0;
        info!("simulation reset with {} creatures", self.population.size());
    }

    /// Best genome seen so far: the current leader if it beats every
    /// finished generation, otherwise the best creature of past generations.
    pub fn save_best(&self) -> Option<Genome> {
        let leader = self.population.best();
        match (&self.champion, leader) {
            (Some((fitness, genome)), Some(leader)) if *fitness >= leader.fitness => Some(genome.clone()),
            (_, Some(leader)) => Some(leader.brain.to_genome()),
            (Some((_, genome)), None) => Some(genome.clone()),
            (None, None) => None,
        }
    }

    /// Copies the best genome (see [`Simulation::save_best`]) into every
    /// creature (all but the first slightly mutated) and starts a new
    /// generation.
    pub fn clone_best(&mut self) {
        let Some(genome) = self.save_best() else {
            return;
        };
        self.seed_population(&genome);
        info!("cloned best genome into {} creatures", self.population.creatures.len());
    }

    /// Installs a saved genome into every creature (all but the first
    /// slightly mutated) and starts a new generation.
    ///
    /// Fails without touching the population if the genome was made for a
    /// different brain topology.
    pub fn load_best(&mut self, genome: &Genome) -> Result<(), SimulationError> {
        let expected = locomotion_topology(self.params.hidden_nodes);
        if genome.topology() != expected {
            return Err(SimulationError::TopologyMismatch {
                expected,
                found: genome.topology(),
            });
        }
        self.seed_population(genome);
        info!("loaded genome into {} creatures", self.population.creatures.len());
        Ok(())
    }

    fn seed_population(&mut self, genome: &Genome) {
        let rate = self.params.clone_mutation_rate;
        let strength = self.params.mutation_strength;
        let spawn_x = self.population.spawn_x();

        for (i, creature) in self.population.creatures.iter_mut().enumerate() {
            let mut brain = NeuralNetwork::from_genome(genome);
            if i > 0 {
                brain.mutate(rate, strength, &mut self.rng);
            }
            *creature = Creature::new(brain, spawn_x);
        }
        self.timer = 0;
        self.rebuild_world();
    }

    /// The living creature furthest ahead, with its torso position.
    fn leader(&self) -> Option<(&Creature, Option<f32>)> {
        let best = self.population.best()?;
        let x = best
            .body()
            .map(|body| body.particle(&self.world, Joint::Torso).pos.x);
        Some((best, x))
    }

    /// Read-only copy of everything a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        let (particles, constraints) = Snapshot::capture_world(&self.world);
        let leader = self.leader();

        Snapshot {
            generation: self.population.generation,
            timer: self.timer,
            best_fitness: leader.map(|(c, _)| c.fitness).unwrap_or(0.0),
            leader_x: leader.and_then(|(_, x)| x),
            particles,
            constraints,
            best_brain: leader.map(|(c, _)| BrainView::from(&c.brain)),
        }
    }
}
