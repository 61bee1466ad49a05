//! Elitist reinsertion.
//!
//! Offspring and the parent generation compete for the places in the next
//! generation; only the fittest `target_size` survive.

use super::types::{compare_fitness, scores, Individual};
use crate::error::GaError;

/// Merges offspring with parents and keeps the fittest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistReinsertion;

impl ElitistReinsertion {
    /// Returns the `target_size` fittest chromosomes of `offspring ++ parents`,
    /// best first.
    ///
    /// The sort is stable over that concatenation, so on equal fitness an
    /// offspring ranks ahead of a parent and earlier entries ahead of later
    /// ones. Chromosomes are moved, keeping their cached fitness.
    ///
    /// # Errors
    /// [`GaError::Contract`] if any chromosome is unscored.
    pub fn reinsert<I: Individual>(
        &self,
        offspring: Vec<I>,
        parents: Vec<I>,
        target_size: usize,
    ) -> Result<Vec<I>, GaError> {
        let mut pool = offspring;
        pool.extend(parents);

        let fitness = scores(&pool)?;
        let mut ranked: Vec<(f64, I)> = fitness.into_iter().zip(pool).collect();
        ranked.sort_by(|a, b| compare_fitness(b.0, a.0));
        ranked.truncate(target_size);

        Ok(ranked.into_iter().map(|(_, ind)| ind).collect())
    }
}
