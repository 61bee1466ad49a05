//! Genetic operators for timetable chromosomes.
//!
//! - [`single_point_crossover`]: two parents → two complementary children
//! - [`point_mutation`]: replace one random gene with a fresh random gene

use rand::Rng;

use super::chromosome::TimetableChromosome;
use super::domain::DomainData;
use crate::error::GaError;

/// Single-point crossover.
///
/// Picks a cut uniformly in `1..len`. Child 1 takes parent 1's genes before
/// the cut and parent 2's from the cut on; child 2 is the complement. Both
/// children are unscored.
///
/// # Errors
/// [`GaError::InvalidInput`] if the parents differ in length or are shorter
/// than two genes.
pub fn single_point_crossover<R: Rng>(
    parent1: &TimetableChromosome,
    parent2: &TimetableChromosome,
    rng: &mut R,
) -> Result<(TimetableChromosome, TimetableChromosome), GaError> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(GaError::InvalidInput(format!(
            "parents must have equal length, got {} and {}",
            n,
            parent2.len()
        )));
    }
    if n < 2 {
        return Err(GaError::InvalidInput(format!(
            "crossover needs at least 2 genes, got {n}"
        )));
    }

    let cut = rng.random_range(1..n);
    let (a, b) = (parent1.schedule(), parent2.schedule());

    let mut child1 = Vec::with_capacity(n);
    child1.extend_from_slice(&a[..cut]);
    child1.extend_from_slice(&b[cut..]);

    let mut child2 = Vec::with_capacity(n);
    child2.extend_from_slice(&b[..cut]);
    child2.extend_from_slice(&a[cut..]);

    Ok((
        TimetableChromosome::from_genes(child1),
        TimetableChromosome::from_genes(child2),
    ))
}

/// Point mutation.
///
/// With probability `probability`, replaces exactly one uniformly chosen
/// gene with a freshly drawn one and returns its index. Otherwise leaves the
/// chromosome untouched (fitness included) and returns `None`. A NaN
/// probability never mutates.
pub fn point_mutation<R: Rng>(
    chromosome: &mut TimetableChromosome,
    domain: &DomainData,
    probability: f64,
    rng: &mut R,
) -> Option<usize> {
    if chromosome.is_empty()
        || probability.is_nan()
        || !rng.random_bool(probability.clamp(0.0, 1.0))
    {
        return None;
    }
    let index = rng.random_range(0..chromosome.len());
    let gene = domain.random_assignment(rng);
    chromosome.replace_gene(index, gene).ok()?;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Individual;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn domain() -> DomainData {
        DomainData::uniform(6, 8, 3, 7, 8, 14)
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let d = domain();
        let mut rng = create_rng(Some(1));
        let a = TimetableChromosome::random(&d, &mut rng);
        let short = TimetableChromosome::from_genes(a.schedule()[..10].to_vec());
        let err = single_point_crossover(&a, &short, &mut rng).unwrap_err();
        assert!(matches!(err, GaError::InvalidInput(_)));
    }

    #[test]
    fn test_crossover_too_short() {
        let d = domain();
        let mut rng = create_rng(Some(1));
        let a = TimetableChromosome::random(&d, &mut rng);
        let one = TimetableChromosome::from_genes(a.schedule()[..1].to_vec());
        assert!(single_point_crossover(&one, &one.clone(), &mut rng).is_err());
    }

    #[test]
    fn test_crossover_children_unscored() {
        let d = domain();
        let mut rng = create_rng(Some(2));
        let mut a = TimetableChromosome::random(&d, &mut rng);
        let mut b = TimetableChromosome::random(&d, &mut rng);
        a.set_fitness(500.0);
        b.set_fitness(600.0);
        let (c1, c2) = single_point_crossover(&a, &b, &mut rng).unwrap();
        assert!(c1.fitness().is_none());
        assert!(c2.fitness().is_none());
    }

    #[test]
    fn test_crossover_two_genes_swaps_tail() {
        let d = domain();
        let mut rng = create_rng(Some(4));
        let a = TimetableChromosome::from_genes(vec![
            d.random_assignment(&mut rng),
            d.random_assignment(&mut rng),
        ]);
        let b = TimetableChromosome::from_genes(vec![
            d.random_assignment(&mut rng),
            d.random_assignment(&mut rng),
        ]);
        // The only cut for length 2 is 1.
        let (c1, c2) = single_point_crossover(&a, &b, &mut rng).unwrap();
        assert_eq!(c1.schedule(), &[a.schedule()[0], b.schedule()[1]]);
        assert_eq!(c2.schedule(), &[b.schedule()[0], a.schedule()[1]]);
    }

    #[test]
    fn test_mutation_probability_zero_is_noop() {
        let d = domain();
        let mut rng = create_rng(Some(8));
        let mut c = TimetableChromosome::random(&d, &mut rng);
        c.set_fitness(321.0);
        let before = c.schedule().to_vec();
        for _ in 0..1000 {
            assert_eq!(point_mutation(&mut c, &d, 0.0, &mut rng), None);
        }
        assert_eq!(c.schedule(), &before[..]);
        assert_eq!(c.fitness(), Some(321.0));
    }

    #[test]
    fn test_mutation_nan_probability_is_noop() {
        let d = domain();
        let mut rng = create_rng(Some(12));
        let mut c = TimetableChromosome::random(&d, &mut rng);
        c.set_fitness(5.0);
        let before = c.schedule().to_vec();
        assert_eq!(point_mutation(&mut c, &d, f64::NAN, &mut rng), None);
        assert_eq!(c.schedule(), &before[..]);
        assert_eq!(c.fitness(), Some(5.0));
    }

    #[test]
    fn test_mutation_probability_one_replaces_one_gene() {
        let d = domain();
        let mut rng = create_rng(Some(8));
        for _ in 0..200 {
            let mut c = TimetableChromosome::random(&d, &mut rng);
            c.set_fitness(1.0);
            let before = c.schedule().to_vec();
            let index = point_mutation(&mut c, &d, 1.0, &mut rng).expect("always mutates");
            assert!(c.fitness().is_none());
            for (i, (old, new)) in before.iter().zip(c.schedule()).enumerate() {
                if i != index {
                    assert_eq!(old, new);
                }
            }
        }
    }

    #[test]
    fn test_mutation_rate_roughly_matches_probability() {
        let d = domain();
        let mut rng = create_rng(Some(21));
        let mut c = TimetableChromosome::random(&d, &mut rng);
        let hits = (0..10_000)
            .filter(|_| point_mutation(&mut c, &d, 0.2, &mut rng).is_some())
            .count();
        assert!((1700..2300).contains(&hits), "got {hits} mutations");
    }

    proptest! {
        #[test]
        fn prop_crossover_children_are_complementary(seed in any::<u64>()) {
            let d = domain();
            let mut rng = create_rng(Some(seed));
            let a = TimetableChromosome::random(&d, &mut rng);
            let b = TimetableChromosome::random(&d, &mut rng);
            let (c1, c2) = single_point_crossover(&a, &b, &mut rng).unwrap();

            prop_assert_eq!(c1.len(), a.len());
            prop_assert_eq!(c2.len(), a.len());
            for i in 0..a.len() {
                let (ga, gb) = (a.schedule()[i], b.schedule()[i]);
                let (g1, g2) = (c1.schedule()[i], c2.schedule()[i]);
                prop_assert!((g1 == ga && g2 == gb) || (g1 == gb && g2 == ga));
            }
            // The first gene always comes from parent 1, the last from parent 2.
            prop_assert_eq!(c1.schedule()[0], a.schedule()[0]);
            prop_assert_eq!(c1.schedule()[a.len() - 1], b.schedule()[a.len() - 1]);
        }
    }
}
