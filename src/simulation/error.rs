//! Error type for the fallible edges of the simulation.

use thiserror::Error;

use super::brain::Topology;

/// Errors raised while configuring the simulation or exchanging genomes.
///
/// Stepping itself never fails; see [`StepReport`](super::driver::StepReport).
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A flat weight vector does not match its declared topology.
    #[error("genome for topology {topology} needs {expected} weights, got {actual}")]
    GenomeLength {
        /// Topology the weights were declared for.
        topology: Topology,
        /// Weight count implied by the topology.
        expected: usize,
        /// Weight count actually supplied.
        actual: usize,
    },
    /// A topology whose weight count overflows `usize`.
    #[error("topology {topology} has too many weights")]
    TopologyTooLarge {
        /// The offending topology.
        topology: Topology,
    },
    /// A genome was offered to a network of a different shape.
    #[error("genome topology {found} does not match expected topology {expected}")]
    TopologyMismatch {
        /// Topology the receiver was built for.
        expected: Topology,
        /// Topology carried by the genome.
        found: Topology,
    },
    /// A configuration value is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam {
        /// Field name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
