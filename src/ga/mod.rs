//! Genetic Algorithm engine.
//!
//! A generic evolutionary engine built on trait-based abstractions. A domain
//! plugs in by implementing [`GaProblem`], which specifies how to create,
//! evaluate, cross and mutate individuals. The engine supplies the
//! population bookkeeping, tournament selection, elitist reinsertion and
//! stagnation termination.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution caching its own fitness
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//! - [`Executor`]: How the phases of one generation are executed
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population bounds, selection, presets)
//! - [`GeneticAlgorithm`]: The driver state machine
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # Strategies
//!
//! - [`Sequential`]: one thread, phases in order
//! - [`TaskParallel`]: rayon worker pool, one barrier per phase
//! - [`DistributedExecutor`]: scatter/gather over [`distributed::Link`]s
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Miller & Goldberg (1995), *Genetic Algorithms, Tournament Selection, and the Effects of Noise*

mod config;
pub mod distributed;
mod driver;
mod executor;
mod parallel;
mod population;
mod reinsertion;
mod selection;
mod termination;
mod types;

pub use config::GaConfig;
pub use distributed::DistributedExecutor;
pub use driver::{DriverState, GaResult, GeneticAlgorithm};
pub use executor::{Executor, Sequential};
pub use parallel::TaskParallel;
pub use population::{Generation, Population};
pub use reinsertion::ElitistReinsertion;
pub use selection::Selection;
pub use termination::StagnationTermination;
pub use types::{GaProblem, Individual, MAX_FITNESS};
