//! Fixed-length assignment chromosome.
//!
//! # Encoding
//!
//! A chromosome is an ordered sequence of [`Assignment`] genes, one per
//! (course, student group) pair, so its length is
//! `courses × groups`. Genes carry no positional meaning beyond that: any
//! gene may hold any course/teacher/room/group/day/slot combination, and
//! the fitness function is what pushes the search toward a consistent
//! timetable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::assignment::Assignment;
use super::domain::DomainData;
use crate::error::GaError;
use crate::ga::Individual;

/// One candidate timetable.
///
/// Cloning deep-copies the genes and leaves the clone unscored; any gene
/// replacement clears the cached fitness.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TimetableChromosome {
    genes: Vec<Assignment>,
    fitness: Option<f64>,
}

impl Clone for TimetableChromosome {
    fn clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
            fitness: None,
        }
    }
}

impl Individual for TimetableChromosome {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    fn gene_count(&self) -> usize {
        self.genes.len()
    }
}

impl TimetableChromosome {
    /// Creates a chromosome of `domain.encoding_length()` random genes.
    pub fn random<R: Rng>(domain: &DomainData, rng: &mut R) -> Self {
        let genes = (0..domain.encoding_length())
            .map(|_| domain.random_assignment(rng))
            .collect();
        Self::from_genes(genes)
    }

    /// Wraps an existing gene sequence. The result is unscored.
    pub fn from_genes(genes: Vec<Assignment>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene(&self, index: usize) -> Option<&Assignment> {
        self.genes.get(index)
    }

    /// Replaces the gene at `index` and clears the cached fitness.
    pub fn replace_gene(&mut self, index: usize, gene: Assignment) -> Result<(), GaError> {
        let len = self.genes.len();
        let slot = self.genes.get_mut(index).ok_or_else(|| {
            GaError::Contract(format!("gene index {index} out of range for length {len}"))
        })?;
        *slot = gene;
        self.fitness = None;
        Ok(())
    }

    /// The timetable this chromosome encodes, in gene order.
    pub fn schedule(&self) -> &[Assignment] {
        &self.genes
    }
}
