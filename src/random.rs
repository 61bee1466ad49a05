//! Random number generation.
//!
//! The engine never touches a global generator. The driver owns one seeded
//! [`StdRng`] and passes it to every operator; work that runs on other
//! threads gets its own generator forked from the driver's in a fixed order,
//! so a run is reproducible from its seed regardless of scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a generator from a seed, or from OS entropy when `seed` is `None`.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Draws `count` child generators from `rng`.
///
/// The children depend only on the state of `rng`, never on which thread
/// later consumes them.
pub fn fork<R: Rng>(rng: &mut R, count: usize) -> Vec<StdRng> {
    (0..count)
        .map(|_| StdRng::seed_from_u64(rng.random()))
        .collect()
}
