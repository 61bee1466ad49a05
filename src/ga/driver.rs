//! Evolution driver.
//!
//! [`GeneticAlgorithm`] owns the problem, the population and an
//! [`Executor`], and runs the generation cycle:
//! evaluate → record best → select → cross → mutate → evaluate offspring →
//! reinsert → repeat, until the best fitness stagnates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::config::GaConfig;
use super::distributed::{DistributedExecutor, Link};
use super::executor::{Executor, Sequential};
use super::parallel::TaskParallel;
use super::population::Population;
use super::reinsertion::ElitistReinsertion;
use super::termination::StagnationTermination;
use super::types::{scores, GaProblem, Individual};
use crate::error::GaError;
use crate::random::create_rng;

/// Lifecycle of a [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, not started.
    Idle,
    /// Creating the first generation.
    Seeding,
    /// Running generation cycles.
    Evolving,
    /// Stopped normally (stagnation, generation cap or cancellation).
    Converged,
    /// Aborted by an error.
    Failed,
}

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations evaluated.
    pub generations: usize,

    /// Wall-clock time of the run.
    pub elapsed: Duration,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness at the end of each generation.
    pub fitness_history: Vec<f64>,
}

/// How a successful run ended.
struct Stop {
    stagnated: bool,
    cancelled: bool,
}

/// Runs a genetic algorithm over `P` with execution strategy `E`.
///
/// # Usage
///
/// ```
/// use u_timetable::ga::{GaConfig, GeneticAlgorithm};
/// use u_timetable::timetable::{DomainData, TimetableProblem};
///
/// let problem = TimetableProblem::new(DomainData::uniform(3, 3, 2, 2, 8, 12)).unwrap();
/// let config = GaConfig::quick().with_population_size(8, 16).with_seed(1);
/// let mut ga = GeneticAlgorithm::sequential(problem, config);
/// let result = ga.start().unwrap();
/// assert_eq!(ga.best_fitness(), Some(result.best_fitness));
/// ```
pub struct GeneticAlgorithm<P: GaProblem, E: Executor<P>> {
    problem: P,
    config: GaConfig,
    executor: E,
    state: DriverState,
    population: Option<Population<P::Individual>>,
    elapsed: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl<P: GaProblem> GeneticAlgorithm<P, Sequential> {
    /// Single-threaded driver.
    pub fn sequential(problem: P, config: GaConfig) -> Self {
        Self::new(problem, config, Sequential)
    }
}

impl<P: GaProblem> GeneticAlgorithm<P, TaskParallel> {
    /// Worker-pool driver with `threads` threads (one per core when `None`).
    pub fn task_parallel(
        problem: P,
        config: GaConfig,
        threads: Option<usize>,
    ) -> Result<Self, GaError> {
        Ok(Self::new(problem, config, TaskParallel::new(threads)?))
    }
}

impl<P, L> GeneticAlgorithm<P, DistributedExecutor<L>>
where
    P: GaProblem,
    P::Individual: Serialize + DeserializeOwned,
    L: Link,
{
    /// Coordinator driver evaluating across one remote worker per link.
    ///
    /// Workers are stopped when the run ends, successfully or not.
    pub fn distributed(problem: P, config: GaConfig, links: Vec<L>) -> Self {
        Self::new(problem, config, DistributedExecutor::new(links))
    }
}

impl<P: GaProblem, E: Executor<P>> GeneticAlgorithm<P, E> {
    pub fn new(problem: P, config: GaConfig, executor: E) -> Self {
        Self {
            problem,
            config,
            executor,
            state: DriverState::Idle,
            population: None,
            elapsed: Duration::ZERO,
            cancel: None,
        }
    }

    /// Installs a cancellation flag.
    ///
    /// When the flag is set the run stops after the generation in progress
    /// and returns the best solution found so far.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Runs the algorithm to termination.
    ///
    /// # Errors
    /// - [`GaError::Config`] for an invalid configuration, before any work
    /// - [`GaError::Contract`] if the driver was already started
    /// - any operator, evaluation or transport error, which aborts the run
    #[instrument(skip_all, fields(strategy = self.executor.name()))]
    pub fn start(&mut self) -> Result<GaResult<P::Individual>, GaError> {
        if self.state != DriverState::Idle {
            return Err(GaError::Contract(format!(
                "driver already started (state {:?})",
                self.state
            )));
        }
        if let Err(e) = self.config.validate() {
            self.state = DriverState::Failed;
            // Remote workers must not outlive a run that never began.
            if let Err(shutdown) = self.executor.shutdown() {
                warn!(error = %shutdown, "shutdown after configuration error failed");
            }
            return Err(e);
        }

        let started = Instant::now();
        let outcome = self.run();
        let shutdown = self.executor.shutdown();
        self.elapsed = started.elapsed();

        let stop = match outcome.and_then(|stop| shutdown.map(|()| stop)) {
            Ok(stop) => stop,
            Err(e) => {
                self.state = DriverState::Failed;
                return Err(e);
            }
        };
        self.state = DriverState::Converged;

        let population = self
            .population
            .as_ref()
            .ok_or_else(|| GaError::Contract("run ended without a population".into()))?;
        let (best, best_fitness) = population
            .best()
            .zip(population.best_fitness())
            .ok_or_else(|| GaError::Contract("run ended without a best chromosome".into()))?;
        let mut best = best.clone();
        best.set_fitness(best_fitness);

        info!(
            generations = population.history().len(),
            best_fitness,
            stagnated = stop.stagnated,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "evolution converged"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations: population.history().len(),
            elapsed: self.elapsed,
            stagnated: stop.stagnated,
            cancelled: stop.cancelled,
            fitness_history: population.history().to_vec(),
        })
    }

    fn run(&mut self) -> Result<Stop, GaError> {
        let mut rng = create_rng(self.config.seed);

        self.state = DriverState::Seeding;
        let population = self.population.insert(Population::seed(
            &self.problem,
            self.config.min_size,
            self.config.max_size,
            &mut rng,
        ));
        info!(
            size = self.config.min_size,
            genes = self.problem.encoding_length(),
            "seed generation created"
        );

        self.state = DriverState::Evolving;
        let mut termination = StagnationTermination::new(self.config.stagnation_generations);
        loop {
            self.executor
                .evaluate(&self.problem, &mut population.current_mut().chromosomes)?;
            let best = population.end_current_generation()?;
            let generation = population.generations_number();
            self.problem.on_generation(generation, best);
            debug!(generation, best_fitness = best, "generation complete");

            if termination.has_reached(best) {
                return Ok(Stop {
                    stagnated: true,
                    cancelled: false,
                });
            }
            if self
                .config
                .max_generations
                .is_some_and(|cap| population.history().len() >= cap)
            {
                return Ok(Stop {
                    stagnated: false,
                    cancelled: false,
                });
            }
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                info!(generation, "evolution cancelled");
                return Ok(Stop {
                    stagnated: false,
                    cancelled: true,
                });
            }

            let next = Self::breed(
                &self.problem,
                &self.config,
                &mut self.executor,
                population,
                &mut rng,
            )?;
            population.create_new_generation(next)?;
        }
    }

    /// Produces the chromosomes of the next generation from the current,
    /// fully scored one.
    fn breed(
        problem: &P,
        config: &GaConfig,
        executor: &mut E,
        population: &mut Population<P::Individual>,
        rng: &mut StdRng,
    ) -> Result<Vec<P::Individual>, GaError> {
        let min_size = population.min_size();
        let current = &population.current().chromosomes;

        let picks = config
            .selection
            .select(current, 2 * (min_size / 2 + 1), rng)?;
        let parents: Vec<P::Individual> = picks.iter().map(|&i| current[i].clone()).collect();

        let mut offspring = executor.cross(problem, &parents, rng)?;
        executor.mutate(problem, &mut offspring, config.mutation_probability, rng);
        executor.evaluate(problem, &mut offspring)?;

        // Reinsertion consumes the current generation: check its inputs first.
        scores(&offspring)?;
        scores(&population.current().chromosomes)?;
        let parents = std::mem::take(&mut population.current_mut().chromosomes);
        ElitistReinsertion.reinsert(offspring, parents, min_size)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The population of the last (or current) run, once seeding happened.
    pub fn population(&self) -> Option<&Population<P::Individual>> {
        self.population.as_ref()
    }

    /// Best chromosome found so far, carrying its fitness.
    ///
    /// Also available after a failed run, if any generation was completed.
    pub fn best_chromosome(&self) -> Option<&P::Individual> {
        self.population.as_ref().and_then(Population::best)
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.population.as_ref().and_then(Population::best_fitness)
    }

    /// Number of generations evaluated.
    pub fn generations_run(&self) -> usize {
        self.population
            .as_ref()
            .map_or(0, |p| p.history().len())
    }

    /// Wall-clock duration of the last run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl<P: GaProblem, E: Executor<P> + std::fmt::Debug> std::fmt::Debug for GeneticAlgorithm<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("config", &self.config)
            .field("executor", &self.executor)
            .field("state", &self.state)
            .field("generations_run", &self.generations_run())
            .finish()
    }
}
