//! Task-parallel strategy.
//!
//! Each phase fans its units of work out to a rayon thread pool and joins
//! before returning, so the driver sees a barrier between evaluate, cross
//! and mutate. Workers only write into the slot they were handed; the
//! driver owns the population between phases.

use rand::rngs::StdRng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::executor::{check_pairs, Executor};
use super::types::{GaProblem, Individual};
use crate::error::GaError;
use crate::random::fork;

/// Worker-pool strategy backed by a dedicated rayon pool.
pub struct TaskParallel {
    pool: ThreadPool,
}

impl TaskParallel {
    /// Builds a pool with `threads` workers, or one per core when `None`.
    pub fn new(threads: Option<usize>) -> Result<Self, GaError> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("ga-worker-{i}"));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        Ok(Self {
            pool: builder.build()?,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for TaskParallel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskParallel")
            .field("threads", &self.threads())
            .finish()
    }
}

impl<P: GaProblem> Executor<P> for TaskParallel {
    fn name(&self) -> &'static str {
        "task-parallel"
    }

    fn evaluate(&mut self, problem: &P, batch: &mut [P::Individual]) -> Result<(), GaError> {
        self.pool.install(|| {
            batch
                .par_iter_mut()
                .filter(|ind| ind.fitness().is_none())
                .for_each(|ind| {
                    let f = problem.evaluate(ind);
                    ind.set_fitness(f);
                });
        });
        Ok(())
    }

    fn cross(
        &mut self,
        problem: &P,
        parents: &[P::Individual],
        rng: &mut StdRng,
    ) -> Result<Vec<P::Individual>, GaError> {
        check_pairs(parents)?;
        let rngs = fork(rng, parents.len() / 2);
        let pairs: Vec<(P::Individual, P::Individual)> = self.pool.install(|| {
            parents
                .par_chunks_exact(2)
                .zip(rngs)
                .map(|(pair, mut pair_rng)| problem.crossover(&pair[0], &pair[1], &mut pair_rng))
                .collect::<Result<_, _>>()
        })?;
        Ok(pairs.into_iter().flat_map(|(c1, c2)| [c1, c2]).collect())
    }

    fn mutate(
        &mut self,
        problem: &P,
        offspring: &mut [P::Individual],
        probability: f64,
        rng: &mut StdRng,
    ) {
        let rngs = fork(rng, offspring.len());
        self.pool.install(|| {
            offspring
                .par_iter_mut()
                .zip(rngs)
                .for_each(|(ind, mut ind_rng)| {
                    problem.mutate(ind, probability, &mut ind_rng);
                });
        });
    }
}
