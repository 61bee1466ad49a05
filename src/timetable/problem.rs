//! Timetable GA problem definition.
//!
//! Implements [`GaProblem`] for [`TimetableChromosome`], bridging the
//! domain data, fitness function and operators to the generic engine.

use rand::Rng;

use super::chromosome::TimetableChromosome;
use super::domain::DomainData;
use super::fitness::TimetableFitness;
use super::operators::{point_mutation, single_point_crossover};
use crate::error::GaError;
use crate::ga::GaProblem;

/// GA problem definition for school timetabling.
///
/// # Example
/// ```no_run
/// use u_timetable::ga::{GaConfig, GeneticAlgorithm};
/// use u_timetable::timetable::{DomainData, TimetableProblem};
///
/// let problem = TimetableProblem::new(DomainData::uniform(6, 8, 3, 7, 8, 14)).unwrap();
/// let mut ga = GeneticAlgorithm::sequential(problem, GaConfig::quick().with_seed(42));
/// let result = ga.start().unwrap();
/// println!("best fitness {}", result.best_fitness);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    domain: DomainData,
    fitness: TimetableFitness,
}

impl TimetableProblem {
    /// Validates the domain and builds the problem.
    pub fn new(domain: DomainData) -> Result<Self, GaError> {
        domain.validate()?;
        Ok(Self {
            domain,
            fitness: TimetableFitness,
        })
    }

    pub fn domain(&self) -> &DomainData {
        &self.domain
    }
}

impl GaProblem for TimetableProblem {
    type Individual = TimetableChromosome;

    fn encoding_length(&self) -> usize {
        self.domain.encoding_length()
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TimetableChromosome {
        TimetableChromosome::random(&self.domain, rng)
    }

    fn evaluate(&self, individual: &TimetableChromosome) -> f64 {
        self.fitness.evaluate(individual)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TimetableChromosome,
        parent2: &TimetableChromosome,
        rng: &mut R,
    ) -> Result<(TimetableChromosome, TimetableChromosome), GaError> {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(
        &self,
        individual: &mut TimetableChromosome,
        probability: f64,
        rng: &mut R,
    ) -> Option<usize> {
        point_mutation(individual, &self.domain, probability, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Individual;
    use crate::random::create_rng;

    #[test]
    fn test_new_rejects_invalid_domain() {
        let mut d = DomainData::uniform(2, 2, 2, 2, 8, 10);
        d.days.clear();
        assert!(matches!(TimetableProblem::new(d), Err(GaError::Config(_))));
    }

    #[test]
    fn test_problem_wires_operators() {
        let p = TimetableProblem::new(DomainData::uniform(3, 4, 2, 3, 8, 12)).unwrap();
        let mut rng = create_rng(Some(6));
        let a = p.create_individual(&mut rng);
        let b = p.create_individual(&mut rng);
        assert_eq!(a.gene_count(), p.encoding_length());

        let score = p.evaluate(&a);
        assert_eq!(score, TimetableFitness.evaluate(&a));

        let (mut c1, c2) = p.crossover(&a, &b, &mut rng).unwrap();
        assert_eq!(c2.gene_count(), 9);
        assert!(p.mutate(&mut c1, 1.0, &mut rng).is_some());
    }
}
