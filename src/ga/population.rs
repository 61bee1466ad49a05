//! Generations and the population that owns them.

use rand::Rng;

use super::types::{compare_fitness, scores, GaProblem, Individual};
use crate::error::GaError;

/// One evolutionary step: a numbered set of chromosomes.
#[derive(Debug, Clone)]
pub struct Generation<I> {
    /// 1-based generation number.
    pub number: usize,
    pub chromosomes: Vec<I>,
}

/// The current generation plus run bookkeeping.
///
/// Invariants: `min_size ≤ |current| ≤ max_size`, every chromosome has the
/// problem's encoding length.
#[derive(Debug, Clone)]
pub struct Population<I> {
    min_size: usize,
    max_size: usize,
    encoding_length: usize,
    current: Generation<I>,
    best: Option<I>,
    best_fitness: Option<f64>,
    history: Vec<f64>,
}

impl<I: Individual> Population<I> {
    /// Seeds generation 1 with `min_size` random chromosomes.
    pub fn seed<P, R>(problem: &P, min_size: usize, max_size: usize, rng: &mut R) -> Self
    where
        P: GaProblem<Individual = I>,
        R: Rng,
    {
        let chromosomes = (0..min_size)
            .map(|_| problem.create_individual(rng))
            .collect();
        Self {
            min_size,
            max_size,
            encoding_length: problem.encoding_length(),
            current: Generation {
                number: 1,
                chromosomes,
            },
            best: None,
            best_fitness: None,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Generation<I> {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Generation<I> {
        &mut self.current
    }

    /// Number of generations created so far.
    pub fn generations_number(&self) -> usize {
        self.current.number
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Best chromosome recorded by [`end_current_generation`](Self::end_current_generation),
    /// carrying its fitness.
    pub fn best(&self) -> Option<&I> {
        self.best.as_ref()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best_fitness
    }

    /// Best fitness recorded at the end of each generation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Closes the current generation: records its best chromosome if it beats
    /// the best seen so far, and appends the running best to the history.
    ///
    /// # Errors
    /// [`GaError::Contract`] if the generation is empty or not fully scored.
    pub fn end_current_generation(&mut self) -> Result<f64, GaError> {
        let fitness = scores(&self.current.chromosomes)?;
        let (idx, gen_best) = fitness
            .iter()
            .copied()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (i, f)| match acc {
                Some((_, best)) if compare_fitness(f, best).is_le() => acc,
                _ => Some((i, f)),
            })
            .ok_or_else(|| GaError::Contract("generation is empty".into()))?;

        if !matches!(self.best_fitness, Some(best) if gen_best <= best) {
            let mut best = self.current.chromosomes[idx].clone();
            best.set_fitness(gen_best);
            self.best = Some(best);
            self.best_fitness = Some(gen_best);
        }
        let best = self.best_fitness.unwrap_or(gen_best);
        self.history.push(best);
        Ok(best)
    }

    /// Installs `chromosomes` as the next generation.
    ///
    /// # Errors
    /// [`GaError::Contract`] if the size leaves `min_size..=max_size` or a
    /// chromosome has the wrong length.
    pub fn create_new_generation(&mut self, chromosomes: Vec<I>) -> Result<(), GaError> {
        if chromosomes.len() < self.min_size || chromosomes.len() > self.max_size {
            return Err(GaError::Contract(format!(
                "generation of {} chromosomes outside {}..={}",
                chromosomes.len(),
                self.min_size,
                self.max_size
            )));
        }
        if let Some(bad) = chromosomes
            .iter()
            .find(|c| c.gene_count() != self.encoding_length)
        {
            return Err(GaError::Contract(format!(
                "chromosome of length {} in a population encoded with {}",
                bad.gene_count(),
                self.encoding_length
            )));
        }
        self.current = Generation {
            number: self.current.number + 1,
            chromosomes,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::timetable::{DomainData, TimetableChromosome, TimetableProblem};

    fn problem() -> TimetableProblem {
        TimetableProblem::new(DomainData::uniform(3, 4, 2, 3, 8, 12)).unwrap()
    }

    fn scored(pop: &mut Population<TimetableChromosome>, values: &[f64]) {
        for (c, &f) in pop.current_mut().chromosomes.iter_mut().zip(values) {
            c.set_fitness(f);
        }
    }

    #[test]
    fn test_seed_creates_min_size() {
        let p = problem();
        let pop = Population::seed(&p, 6, 10, &mut create_rng(Some(1)));
        assert_eq!(pop.current().chromosomes.len(), 6);
        assert_eq!(pop.generations_number(), 1);
        assert!(pop.best().is_none());
        assert!(pop
            .current()
            .chromosomes
            .iter()
            .all(|c| c.len() == 9 && c.fitness().is_none()));
    }

    #[test]
    fn test_end_generation_requires_scores() {
        let p = problem();
        let mut pop = Population::seed(&p, 3, 3, &mut create_rng(Some(1)));
        assert!(matches!(
            pop.end_current_generation(),
            Err(GaError::Contract(_))
        ));
    }

    #[test]
    fn test_end_generation_tracks_best() {
        let p = problem();
        let mut pop = Population::seed(&p, 3, 3, &mut create_rng(Some(1)));
        scored(&mut pop, &[10.0, 30.0, 20.0]);
        assert_eq!(pop.end_current_generation().unwrap(), 30.0);
        let best_genes = pop.current().chromosomes[1].schedule().to_vec();
        assert_eq!(pop.best().unwrap().schedule(), &best_genes[..]);
        assert_eq!(pop.best().unwrap().fitness(), Some(30.0));

        // A worse generation keeps the old best.
        let next = pop.current().chromosomes.clone();
        pop.create_new_generation(next).unwrap();
        scored(&mut pop, &[5.0, 6.0, 7.0]);
        assert_eq!(pop.end_current_generation().unwrap(), 30.0);
        assert_eq!(pop.best().unwrap().schedule(), &best_genes[..]);
        assert_eq!(pop.history(), &[30.0, 30.0]);
        assert_eq!(pop.generations_number(), 2);
    }

    #[test]
    fn test_new_generation_size_bounds() {
        let p = problem();
        let mut pop = Population::seed(&p, 2, 3, &mut create_rng(Some(1)));
        let mut rng = create_rng(Some(2));
        let one = vec![p.create_individual(&mut rng)];
        assert!(pop.create_new_generation(one).is_err());
        let four: Vec<_> = (0..4).map(|_| p.create_individual(&mut rng)).collect();
        assert!(pop.create_new_generation(four).is_err());
        let three: Vec<_> = (0..3).map(|_| p.create_individual(&mut rng)).collect();
        assert!(pop.create_new_generation(three).is_ok());
    }

    #[test]
    fn test_new_generation_rejects_wrong_length() {
        let p = problem();
        let mut pop = Population::seed(&p, 1, 1, &mut create_rng(Some(1)));
        let short = TimetableChromosome::from_genes(vec![]);
        assert!(matches!(
            pop.create_new_generation(vec![short]),
            Err(GaError::Contract(_))
        ));
    }
}
