//! Execution strategies.
//!
//! An [`Executor`] decides *how* the phases of a generation run: fitness
//! evaluation, crossover of parent pairs and mutation of offspring. The
//! logical shape of the cycle belongs to the
//! [`GeneticAlgorithm`](super::GeneticAlgorithm) driver and is the same for
//! every strategy.
//!
//! Crossover and mutation draw one forked generator per unit of work (per
//! pair, per offspring) from the driver's generator, in unit order. Every
//! strategy therefore consumes randomness identically, and a seeded run
//! produces the same result whichever strategy executes it.

use rand::rngs::StdRng;

use super::types::{GaProblem, Individual};
use crate::error::GaError;
use crate::random::fork;

/// How one generation's phases are executed.
pub trait Executor<P: GaProblem> {
    /// Short strategy name for logs.
    fn name(&self) -> &'static str;

    /// Scores every unscored individual of `batch` in place.
    ///
    /// Individuals that already carry a fitness are left untouched.
    fn evaluate(&mut self, problem: &P, batch: &mut [P::Individual]) -> Result<(), GaError>;

    /// Crosses `parents[0]` with `parents[1]`, `parents[2]` with
    /// `parents[3]`, and so on, returning the children in pair order.
    ///
    /// # Errors
    /// [`GaError::Contract`] if `parents` has odd length.
    fn cross(
        &mut self,
        problem: &P,
        parents: &[P::Individual],
        rng: &mut StdRng,
    ) -> Result<Vec<P::Individual>, GaError> {
        check_pairs(parents)?;
        let rngs = fork(rng, parents.len() / 2);
        let mut offspring = Vec::with_capacity(parents.len());
        for (pair, mut pair_rng) in parents.chunks_exact(2).zip(rngs) {
            let (c1, c2) = problem.crossover(&pair[0], &pair[1], &mut pair_rng)?;
            offspring.push(c1);
            offspring.push(c2);
        }
        Ok(offspring)
    }

    /// Applies mutation to every offspring independently.
    fn mutate(
        &mut self,
        problem: &P,
        offspring: &mut [P::Individual],
        probability: f64,
        rng: &mut StdRng,
    ) {
        let rngs = fork(rng, offspring.len());
        for (ind, mut ind_rng) in offspring.iter_mut().zip(rngs) {
            problem.mutate(ind, probability, &mut ind_rng);
        }
    }

    /// Releases strategy resources (e.g. stops remote workers).
    ///
    /// Called once when a run ends, whether it converged or failed.
    fn shutdown(&mut self) -> Result<(), GaError> {
        Ok(())
    }
}

/// Single-threaded strategy: every phase runs to completion in order on the
/// calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl<P: GaProblem> Executor<P> for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn evaluate(&mut self, problem: &P, batch: &mut [P::Individual]) -> Result<(), GaError> {
        for ind in batch.iter_mut().filter(|ind| ind.fitness().is_none()) {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        }
        Ok(())
    }
}

pub(crate) fn check_pairs<I>(parents: &[I]) -> Result<(), GaError> {
    if parents.len() % 2 != 0 {
        return Err(GaError::Contract(format!(
            "number of parents must be even, got {}",
            parents.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::timetable::{DomainData, TimetableProblem};

    fn problem() -> TimetableProblem {
        TimetableProblem::new(DomainData::uniform(4, 5, 2, 3, 8, 12)).unwrap()
    }

    #[test]
    fn test_evaluate_scores_unscored_only() {
        let p = problem();
        let mut rng = create_rng(Some(1));
        let mut batch: Vec<_> = (0..5).map(|_| p.create_individual(&mut rng)).collect();
        batch[2].set_fitness(-1.0);
        Sequential.evaluate(&p, &mut batch).unwrap();
        assert_eq!(batch[2].fitness(), Some(-1.0));
        for (i, ind) in batch.iter().enumerate().filter(|(i, _)| *i != 2) {
            assert_eq!(ind.fitness(), Some(p.evaluate(ind)), "index {i}");
        }
    }

    #[test]
    fn test_cross_rejects_odd_parents() {
        let p = problem();
        let mut rng = create_rng(Some(1));
        let parents: Vec<_> = (0..3).map(|_| p.create_individual(&mut rng)).collect();
        let err = Sequential.cross(&p, &parents, &mut rng).unwrap_err();
        assert!(matches!(err, GaError::Contract(_)));
    }

    #[test]
    fn test_cross_produces_one_child_per_parent() {
        let p = problem();
        let mut rng = create_rng(Some(1));
        let parents: Vec<_> = (0..6).map(|_| p.create_individual(&mut rng)).collect();
        let children = Sequential.cross(&p, &parents, &mut rng).unwrap();
        assert_eq!(children.len(), 6);
        assert!(children.iter().all(|c| c.fitness().is_none()));
    }

    #[test]
    fn test_mutate_probability_zero_keeps_genes() {
        let p = problem();
        let mut rng = create_rng(Some(1));
        let mut offspring: Vec<_> = (0..4).map(|_| p.create_individual(&mut rng)).collect();
        let before: Vec<_> = offspring.iter().map(|c| c.schedule().to_vec()).collect();
        Executor::<TimetableProblem>::mutate(&mut Sequential, &p, &mut offspring, 0.0, &mut rng);
        let after: Vec<_> = offspring.iter().map(|c| c.schedule().to_vec()).collect();
        assert_eq!(before, after);
    }
}
