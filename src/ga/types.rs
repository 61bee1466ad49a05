//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generic evolutionary engine and a domain encoding
//! such as [`TimetableProblem`](crate::timetable::TimetableProblem).

use rand::Rng;

use crate::error::GaError;

/// Best fitness any individual can reach.
pub const MAX_FITNESS: f64 = 1000.0;

/// A candidate solution in the population.
///
/// Individuals cache their own fitness. The cache is empty (`None`) until
/// the engine evaluates the individual, and must be cleared by the
/// implementation whenever a gene changes. `Clone` is expected to copy the
/// genes and leave the clone unscored.
///
/// Higher fitness is better (maximization).
pub trait Individual: Clone + Send + Sync {
    /// Returns the cached fitness, if evaluated.
    fn fitness(&self) -> Option<f64>;

    /// Stores the fitness computed by the engine.
    fn set_fitness(&mut self, fitness: f64);

    /// Number of genes.
    fn gene_count(&self) -> usize;
}

/// Defines a GA optimization problem.
///
/// This is the trait a domain implements to plug into the engine. It covers:
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Evaluation**: How to compute fitness
/// 3. **Crossover**: How to recombine two parents into two children
/// 4. **Mutation**: How to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the task-parallel strategy
/// evaluates, crosses and mutates on a rayon pool.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Length every individual of this problem must have.
    fn encoding_length(&self) -> usize;

    /// Creates an individual with independently randomized genes.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes fitness. Must be a pure function of the genes.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into two children.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Result<(Self::Individual, Self::Individual), GaError>;

    /// With probability `probability`, perturbs the individual in place.
    ///
    /// Returns the index of the replaced gene, or `None` when nothing changed.
    fn mutate<R: Rng>(
        &self,
        individual: &mut Self::Individual,
        probability: f64,
        rng: &mut R,
    ) -> Option<usize>;

    /// Called at the end of each generation with the best fitness so far.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}

/// Orders two fitness values, treating incomparable values as equal.
pub(crate) fn compare_fitness(a: f64, b: f64) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Returns the fitness of every individual, or a contract error naming the
/// first unscored position.
pub(crate) fn scores<I: Individual>(individuals: &[I]) -> Result<Vec<f64>, GaError> {
    individuals
        .iter()
        .enumerate()
        .map(|(i, ind)| {
            ind.fitness().ok_or_else(|| {
                GaError::Contract(format!("individual {i} has not been evaluated"))
            })
        })
        .collect()
}
