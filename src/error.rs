//! Error type shared by the engine and the timetable domain.

/// Errors surfaced by the evolutionary engine.
///
/// None of these are recovered internally: a failed operator or evaluation
/// aborts the run and is returned from [`GeneticAlgorithm::start`].
///
/// [`GeneticAlgorithm::start`]: crate::ga::GeneticAlgorithm::start
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    /// Invalid run configuration, raised before any evolutionary work.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Operator input that cannot be processed (e.g. parents of different length).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A caller broke an operator's contract (odd parent count, unscored
    /// candidates, out-of-range gene index).
    #[error("contract violation: {0}")]
    Contract(String),

    /// I/O failure on a worker link.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode frame: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// A worker answered with the wrong number of scores.
    #[error("worker {worker} returned {received} scores for {expected} chromosomes")]
    Protocol {
        worker: usize,
        expected: usize,
        received: usize,
    },

    /// The other end of a worker link went away.
    #[error("worker link disconnected")]
    Disconnected,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
