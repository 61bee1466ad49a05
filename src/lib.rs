//! Genetic-algorithm school timetable generator.
//!
//! Builds weekly timetables that assign every (course, student group) pair a
//! teacher, a room, a day and a timeslot:
//!
//! - **Timetable domain** ([`timetable`]): the gene and chromosome encoding,
//!   the fitness evaluator (hard conflicts, workload balance, idle gaps) and
//!   the single-point crossover and point mutation operators.
//! - **Genetic Algorithm** ([`ga`]): a domain-agnostic engine with tournament
//!   selection, elitist reinsertion and stagnation termination, driven by one
//!   of three execution strategies: sequential, a task-parallel worker pool,
//!   or distributed scatter/gather over message links.
//!
//! # Architecture
//!
//! The engine knows nothing about timetables; the timetable domain plugs in
//! through [`ga::GaProblem`]. Randomness is never global: the driver owns one
//! seeded generator ([`random`]) and hands forked generators to parallel
//! work, so a seeded run gives the same timetable under every strategy.
//!
//! # Example
//!
//! ```
//! use u_timetable::ga::{GaConfig, GeneticAlgorithm};
//! use u_timetable::timetable::{DomainData, TimetableProblem};
//!
//! let domain = DomainData::uniform(4, 5, 3, 2, 8, 14);
//! let problem = TimetableProblem::new(domain).unwrap();
//! let config = GaConfig::quick().with_population_size(10, 20).with_seed(7);
//!
//! let result = GeneticAlgorithm::task_parallel(problem, config, Some(2))
//!     .unwrap()
//!     .start()
//!     .unwrap();
//! assert!(result.best_fitness <= 1000.0);
//! ```

pub mod error;
pub mod ga;
pub mod random;
pub mod timetable;

pub use error::GaError;
