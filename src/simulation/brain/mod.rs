//! Feedforward neural network used as a creature's brain.
//!
//! Fixed three-layer topology (inputs → hidden → outputs), fully connected,
//! no biases and no recurrence. Both layers use `tanh`, so every output is
//! a bounded muscle signal in `[-1, 1]`.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::SimulationError;

pub mod genome;

pub use genome::Genome;

/// Half-width of the uniform range used for fresh weights.
pub const INITIAL_WEIGHT_RANGE: f32 = 1.0;

/// Layer widths of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    /// Number of input nodes.
    pub input_nodes: usize,
    /// Number of hidden nodes.
    pub hidden_nodes: usize,
    /// Number of output nodes.
    pub output_nodes: usize,
}

impl Topology {
    /// Creates a topology from its layer widths.
    pub const fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize) -> Self {
        Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
        }
    }

    /// Number of weights in a genome of this topology, or `None` if the
    /// count does not fit in a `usize`.
    pub fn genome_length(&self) -> Option<usize> {
        let ih = self.input_nodes.checked_mul(self.hidden_nodes)?;
        let ho = self.hidden_nodes.checked_mul(self.output_nodes)?;
        ih.checked_add(ho)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.input_nodes, self.hidden_nodes, self.output_nodes
        )
    }
}

/// A fully connected `inputs → hidden → outputs` network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    topology: Topology,
    /// Input to hidden weights, shape `(input_nodes, hidden_nodes)`.
    weights_ih: Array2<f32>,
    /// Hidden to output weights, shape `(hidden_nodes, output_nodes)`.
    weights_ho: Array2<f32>,
}

impl NeuralNetwork {
    /// Creates a network with uniformly random weights in
    /// `[-INITIAL_WEIGHT_RANGE, INITIAL_WEIGHT_RANGE]`.
    pub fn random(topology: Topology, rng: &mut impl Rng) -> Self {
        let mut sample = || rng.random_range(-INITIAL_WEIGHT_RANGE..=INITIAL_WEIGHT_RANGE);
        let weights_ih =
            Array2::from_shape_fn((topology.input_nodes, topology.hidden_nodes), |_| sample());
        let weights_ho =
            Array2::from_shape_fn((topology.hidden_nodes, topology.output_nodes), |_| sample());

        Self {
            topology,
            weights_ih,
            weights_ho,
        }
    }

    /// Creates a network whose weights are all zero.
    pub fn zeros(topology: Topology) -> Self {
        Self {
            topology,
            weights_ih: Array2::zeros((topology.input_nodes, topology.hidden_nodes)),
            weights_ho: Array2::zeros((topology.hidden_nodes, topology.output_nodes)),
        }
    }

    /// Layer widths.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of input nodes.
    pub fn input_nodes(&self) -> usize {
        self.topology.input_nodes
    }

    /// Number of hidden nodes.
    pub fn hidden_nodes(&self) -> usize {
        self.topology.hidden_nodes
    }

    /// Number of output nodes.
    pub fn output_nodes(&self) -> usize {
        self.topology.output_nodes
    }

    /// Input to hidden weights, indexed `[input, hidden]`.
    pub fn weights_ih(&self) -> &Array2<f32> {
        &self.weights_ih
    }

    /// Hidden to output weights, indexed `[hidden, output]`.
    pub fn weights_ho(&self) -> &Array2<f32> {
        &self.weights_ho
    }

    /// Runs a forward pass.
    ///
    /// Returns `None` when `inputs.len()` differs from the number of input
    /// nodes; callers treat that as "no decision this tick".
    #[inline]
    pub fn predict(&self, inputs: &[f32]) -> Option<Array1<f32>> {
        if inputs.len() != self.topology.input_nodes {
            return None;
        }

        let inputs = ArrayView1::from(inputs);
        let mut hidden = inputs.dot(&self.weights_ih);
        hidden.mapv_inplace(f32::tanh);

        let mut outputs = hidden.dot(&self.weights_ho);
        outputs.mapv_inplace(f32::tanh);
        Some(outputs)
    }

    /// Perturbs each weight independently with probability `rate` by a
    /// uniform delta in `[-strength, strength]`.
    ///
    /// Weights are not clamped afterwards.
    pub fn mutate(&mut self, rate: f32, strength: f32, rng: &mut impl Rng) {
        let strength = strength.abs();
        for weight in self.weights_ih.iter_mut().chain(self.weights_ho.iter_mut()) {
            if rng.random::<f32>() < rate {
                *weight += rng.random_range(-strength..=strength);
            }
        }
    }

    /// Flattens the weights into a genome.
    ///
    /// Order: `weights_ih` row by row (`[i * hidden + j]` holds input `i` to
    /// hidden `j`), then `weights_ho` row by row.
    pub fn to_genome(&self) -> Genome {
        let weights = self
            .weights_ih
            .iter()
            .chain(self.weights_ho.iter())
            .copied()
            .collect();
        Genome::from_parts(self.topology, weights)
    }

    /// Builds a network from a genome.
    pub fn from_genome(genome: &Genome) -> Self {
        let topology = genome.topology();
        let (ih, ho) = genome.weights().split_at(topology.input_nodes * topology.hidden_nodes);

        // Genome length is validated on construction, so the shapes always match.
        let weights_ih = Array2::from_shape_fn((topology.input_nodes, topology.hidden_nodes), |(i, j)| {
            ih[i * topology.hidden_nodes + j]
        });
        let weights_ho = Array2::from_shape_fn((topology.hidden_nodes, topology.output_nodes), |(j, k)| {
            ho[j * topology.output_nodes + k]
        });

        Self {
            topology,
            weights_ih,
            weights_ho,
        }
    }

    /// Replaces this network's weights with a genome of the same topology.
    pub fn load_genome(&mut self, genome: &Genome) -> Result<(), SimulationError> {
        if genome.topology() != self.topology {
            return Err(SimulationError::TopologyMismatch {
                expected: self.topology,
                found: genome.topology(),
            });
        }
        *self = Self::from_genome(genome);
        Ok(())
    }
}
