//! The evolving set of creatures and its genetic algorithm.
//!
//! At every generation boundary the population is ranked by fitness, the
//! best genomes are carried over unchanged (elitism), and the remaining
//! slots are filled with mutated uniform-crossover children of parents
//! picked by fitness-proportionate (roulette) selection.

use log::debug;
use rand::Rng;

use super::brain::{Genome, NeuralNetwork, Topology};
use super::creature::Creature;
use super::stats::GenerationSummary;

/// Knobs for one call to [`Population::evolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breeding {
    /// Per-weight probability of mutation.
    pub mutation_rate: f32,
    /// Half-width of the uniform mutation delta.
    pub mutation_strength: f32,
    /// Number of top genomes copied unmutated into the next generation.
    pub elite_count: usize,
}

/// A fixed-size population of creatures.
#[derive(Debug, Clone)]
pub struct Population {
    /// Current creatures; always exactly `size` of them once initialized.
    pub creatures: Vec<Creature>,
    /// Generations evolved since the last `init`.
    pub generation: u32,
    size: usize,
    spawn_x: f32,
}

impl Population {
    /// Creates an empty population that will hold `size` creatures spawned
    /// at `spawn_x`.
    pub fn new(size: usize, spawn_x: f32) -> Self {
        Self {
            creatures: Vec::with_capacity(size),
            generation: 0,
            size,
            spawn_x,
        }
    }

    /// Target number of creatures.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Where new creatures are spawned.
    pub fn spawn_x(&self) -> f32 {
        self.spawn_x
    }

    /// Fills the population with random brains of the given topology.
    pub fn init(&mut self, topology: Topology, rng: &mut impl Rng) {
        let spawn_x = self.spawn_x;
        self.init_with(topology, rng, |brain| Creature::new(brain, spawn_x));
    }

    /// Like [`Population::init`], but every creature is built by `factory`
    /// from a freshly randomized brain.
    pub fn init_with<R, F>(&mut self, topology: Topology, rng: &mut R, mut factory: F)
    where
        R: Rng,
        F: FnMut(NeuralNetwork) -> Creature,
    {
        self.creatures = (0..self.size)
            .map(|_| factory(NeuralNetwork::random(topology, rng)))
            .collect();
        self.generation = 0;
    }

    /// The creature with the highest fitness; the first one on ties, which
    /// is the creature `evolve` keeps as its top elite.
    pub fn best(&self) -> Option<&Creature> {
        self.creatures
            .iter()
            .min_by(|a, b| b.fitness.total_cmp(&a.fitness))
    }

    /// Replaces every creature with an offspring and advances the
    /// generation counter.
    ///
    /// The population length is unchanged. Returns the summary of the
    /// generation that just ended.
    pub fn evolve(&mut self, breeding: Breeding, rng: &mut impl Rng) -> GenerationSummary {
        let summary = GenerationSummary::from_creatures(self.generation, &self.creatures);
        if self.creatures.is_empty() {
            self.generation += 1;
            return summary;
        }

        let mut ranked: Vec<&Creature> = self.creatures.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let genomes: Vec<Genome> = ranked.iter().map(|c| c.brain.to_genome()).collect();
        let fitnesses: Vec<f32> = ranked.iter().map(|c| sanitize(c.fitness)).collect();
        let total: f32 = fitnesses.iter().sum();

        let elite_count = breeding.elite_count.min(self.size);
        let mut offspring: Vec<NeuralNetwork> = genomes
            .iter()
            .take(elite_count)
            .map(NeuralNetwork::from_genome)
            .collect();

        while offspring.len() < self.size {
            let parent1 = &genomes[select_parent(&fitnesses, total, rng)];
            let parent2 = &genomes[select_parent(&fitnesses, total, rng)];
            let child = Genome::crossover(parent1, parent2, rng);

            let mut brain = NeuralNetwork::from_genome(&child);
            brain.mutate(breeding.mutation_rate, breeding.mutation_strength, rng);
            offspring.push(brain);
        }

        let spawn_x = self.spawn_x;
        self.creatures = offspring
            .into_iter()
            .map(|brain| Creature::new(brain, spawn_x))
            .collect();
        self.generation += 1;

        debug!(
            "generation {} bred: {} elites, roulette over total fitness {:.2}",
            self.generation, elite_count, total
        );

        summary
    }
}

fn sanitize(fitness: f32) -> f32 {
    if fitness.is_finite() { fitness.max(0.0) } else { 0.0 }
}

/// Roulette-wheel selection; falls back to a uniform pick when no creature
/// has positive fitness.
fn select_parent(fitnesses: &[f32], total: f32, rng: &mut impl Rng) -> usize {
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..fitnesses.len());
    }

    let mut target = rng.random::<f32>() * total;
    for (i, &fitness) in fitnesses.iter().enumerate() {
        if target < fitness {
            return i;
        }
        target -= fitness;
    }

    // Rounding can leave a sliver past the last slot.
    fitnesses
        .iter()
        .rposition(|&f| f > 0.0)
        .unwrap_or(fitnesses.len() - 1)
}
