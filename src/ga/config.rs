//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::GaError;

/// Configuration for the Genetic Algorithm.
///
/// Controls population bounds, selection, mutation rate and termination.
/// The execution strategy is chosen by the
/// [`GeneticAlgorithm`](super::GeneticAlgorithm) constructor, not here.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.min_size, 50);
/// assert_eq!(config.max_size, 100);
/// assert_eq!(config.stagnation_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(30, 60)
///     .with_selection(Selection::Tournament(3))
///     .with_mutation_probability(0.1)
///     .with_stagnation_generations(25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of chromosomes seeded into the first generation and kept by
    /// reinsertion in every later one.
    pub min_size: usize,

    /// Upper bound on any generation's size.
    pub max_size: usize,

    /// Probability that an offspring receives a point mutation (0.0–1.0).
    pub mutation_probability: f64,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Stop once the best fitness has not improved for this many
    /// consecutive generations.
    pub stagnation_generations: usize,

    /// Optional hard cap on the number of generations.
    ///
    /// `None` (the default) relies on stagnation alone.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            min_size: 50,
            max_size: 100,
            mutation_probability: 0.2,
            selection: Selection::default(),
            stagnation_generations: 100,
            max_generations: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the minimum and maximum generation size.
    pub fn with_population_size(mut self, min_size: usize, max_size: usize) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the stagnation window.
    pub fn with_stagnation_generations(mut self, n: usize) -> Self {
        self.stagnation_generations = n;
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Long search: 100-generation stagnation window, mutation 0.2.
    pub fn thorough() -> Self {
        Self::default()
    }

    /// Short search: 10-generation stagnation window, mutation 0.1.
    pub fn quick() -> Self {
        Self {
            mutation_probability: 0.1,
            stagnation_generations: 10,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::Config`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.min_size == 0 {
            return Err(GaError::Config("min_size must be at least 1".into()));
        }
        if self.max_size < self.min_size {
            return Err(GaError::Config(format!(
                "max_size ({}) must be at least min_size ({})",
                self.max_size, self.min_size
            )));
        }
        if self.stagnation_generations == 0 {
            return Err(GaError::Config(
                "stagnation_generations must be at least 1".into(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(GaError::Config(
                "max_generations must be positive or None".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::Config(
                "mutation_probability must be within 0.0..=1.0".into(),
            ));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(GaError::Config("tournament size must be at least 1".into()));
        }
        Ok(())
    }
}
