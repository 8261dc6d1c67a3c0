//! Flat weight vectors used as the unit of inheritance.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::super::error::SimulationError;
use super::Topology;

/// The flattened weights of a [`NeuralNetwork`](super::NeuralNetwork),
/// tagged with the topology they belong to.
///
/// The weight count always equals `topology.genome_length()`; this is
/// checked by [`Genome::new`] and again whenever a genome is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenomeRecord")]
pub struct Genome {
    topology: Topology,
    weights: Vec<f32>,
}

/// Unvalidated wire form of a genome.
#[derive(Deserialize)]
struct GenomeRecord {
    topology: Topology,
    weights: Vec<f32>,
}

impl TryFrom<GenomeRecord> for Genome {
    type Error = SimulationError;

    fn try_from(record: GenomeRecord) -> Result<Self, Self::Error> {
        Genome::new(record.topology, record.weights)
    }
}

impl Genome {
    /// Wraps a weight vector, rejecting it if its length does not match
    /// the topology.
    pub fn new(topology: Topology, weights: Vec<f32>) -> Result<Self, SimulationError> {
        let expected = topology
            .genome_length()
            .ok_or(SimulationError::TopologyTooLarge { topology })?;
        if weights.len() != expected {
            return Err(SimulationError::GenomeLength {
                topology,
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self { topology, weights })
    }

    /// Callers inside the crate guarantee the length.
    pub(crate) fn from_parts(topology: Topology, weights: Vec<f32>) -> Self {
        debug_assert_eq!(Some(weights.len()), topology.genome_length());
        Self { topology, weights }
    }

    /// Topology these weights belong to.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Weights in network order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Consumes the genome and returns the raw weights.
    pub fn into_weights(self) -> Vec<f32> {
        self.weights
    }

    /// Uniform crossover: each weight is taken from either parent with
    /// equal probability.
    ///
    /// Parents of different topologies cannot be combined; the first
    /// parent is returned unchanged in that case.
    pub fn crossover(parent1: &Genome, parent2: &Genome, rng: &mut impl Rng) -> Genome {
        if parent1.topology != parent2.topology {
            return parent1.clone();
        }

        let weights = parent1
            .weights
            .iter()
            .zip(&parent2.weights)
            .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
            .collect();

        Self::from_parts(parent1.topology, weights)
    }

    /// Writes the genome as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a genome from JSON, validating its length.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let genome = serde_json::from_str(&json)?;
        Ok(genome)
    }
}
