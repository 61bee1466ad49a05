//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes of the current generation become
//! parents. Every strategy reads cached fitness only, so the generation must
//! be fully evaluated first.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{compare_fitness, scores, Individual};
use crate::error::GaError;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// // Binary tournament (the default)
/// let sel = Selection::Tournament(2);
///
/// // Deterministic truncation to the fittest
/// let sel = Selection::Elite;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Tournament selection: draw `k` chromosomes at random (with
    /// replacement) and keep the fittest.
    ///
    /// - k=2: light pressure, the default
    /// - k>4: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selected parent
    Tournament(usize),

    /// Elite selection: the fittest chromosomes in descending order,
    /// wrapping around when more parents than chromosomes are requested.
    ///
    /// # Complexity
    /// O(n log n) per call
    Elite,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(2)
    }
}

impl Selection {
    /// Selects `count` parent indices from `population`.
    ///
    /// # Errors
    /// [`GaError::Contract`] if the population is empty or any chromosome
    /// is unscored.
    pub fn select<I: Individual, R: Rng>(
        &self,
        population: &[I],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>, GaError> {
        if population.is_empty() {
            return Err(GaError::Contract("cannot select from empty population".into()));
        }
        let fitness = scores(population)?;

        Ok(match self {
            Selection::Tournament(k) => (0..count)
                .map(|_| tournament(&fitness, *k, rng))
                .collect(),
            Selection::Elite => elite(&fitness, count),
        })
    }
}

/// Tournament selection: pick k random chromosomes, return the fittest.
fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

fn elite(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| compare_fitness(fitness[b], fitness[a]));
    order.into_iter().cycle().take(count).collect()
}
