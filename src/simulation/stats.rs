//! Per-generation fitness statistics.
//!
//! Every call to [`Population::evolve`](super::population::Population::evolve)
//! yields a [`GenerationSummary`]; the driver keeps the most recent ones in an
//! [`EvolutionHistory`].

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::creature::Creature;

/// Fitness figures for one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation that was evaluated (before the counter was incremented).
    pub generation: u32,
    /// Highest fitness.
    pub best_fitness: f32,
    /// Mean fitness over the whole population.
    pub mean_fitness: f32,
    /// Lowest fitness.
    pub worst_fitness: f32,
    /// Creatures still alive when the generation ended.
    pub alive: usize,
}

impl GenerationSummary {
    /// Summarizes the creatures of a finished generation.
    pub fn from_creatures(generation: u32, creatures: &[Creature]) -> Self {
        if creatures.is_empty() {
            return Self {
                generation,
                best_fitness: 0.0,
                mean_fitness: 0.0,
                worst_fitness: 0.0,
                alive: 0,
            };
        }

        let best_fitness = creatures.iter().map(|c| c.fitness).fold(f32::MIN, f32::max);
        let worst_fitness = creatures.iter().map(|c| c.fitness).fold(f32::MAX, f32::min);
        let mean_fitness =
            creatures.iter().map(|c| c.fitness).sum::<f32>() / creatures.len() as f32;

        Self {
            generation,
            best_fitness,
            mean_fitness,
            worst_fitness,
            alive: creatures.iter().filter(|c| c.alive).count(),
        }
    }
}

/// Rolling record of recent generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionHistory {
    /// Most recent generations, oldest first.
    pub summaries: VecDeque<GenerationSummary>,
    /// Maximum number of generations to keep
    pub max_history: usize,
    best_ever: Option<GenerationSummary>,
}

impl Default for EvolutionHistory {
    fn default() -> Self {
        Self::new(100) // Track last 100 generations
    }
}

impl EvolutionHistory {
    /// Creates an empty history keeping at most `max_history` entries.
    pub fn new(max_history: usize) -> Self {
        Self {
            summaries: VecDeque::with_capacity(max_history),
            max_history,
            best_ever: None,
        }
    }

    /// Record a finished generation
    pub fn record(&mut self, summary: GenerationSummary) {
        self.summaries.push_back(summary);
        if self.summaries.len() > self.max_history {
            self.summaries.pop_front();
        }

        if self
            .best_ever
            .is_none_or(|best| summary.best_fitness > best.best_fitness)
        {
            self.best_ever = Some(summary);
        }
    }

    /// Most recently recorded generation.
    pub fn latest(&self) -> Option<&GenerationSummary> {
        self.summaries.back()
    }

    /// Generation with the highest best fitness seen so far, including
    /// generations already dropped from the rolling window.
    pub fn best_ever(&self) -> Option<&GenerationSummary> {
        self.best_ever.as_ref()
    }

    /// Average of `best_fitness` over the recorded window.
    pub fn avg_best_fitness(&self) -> f32 {
        if self.summaries.is_empty() {
            0.0
        } else {
            self.summaries.iter().map(|s| s.best_fitness).sum::<f32>()
                / self.summaries.len() as f32
        }
    }

    /// Number of generations in the window
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// `true` before the first generation finishes.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.summaries.clear();
        self.best_ever = None;
    }
}
