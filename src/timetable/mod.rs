//! School timetable encoding.
//!
//! Everything specific to timetabling lives here; the engine in
//! [`crate::ga`] only sees it through [`TimetableProblem`].
//!
//! # Key Types
//!
//! - [`DomainData`]: id ranges, days and slots supplied by the caller
//! - [`Assignment`]: one gene (course, teacher, room, group, day, slot)
//! - [`TimetableChromosome`]: a full candidate timetable
//! - [`TimetableFitness`]: hard/soft constraint scoring
//! - [`TimetableProblem`]: the [`GaProblem`](crate::ga::GaProblem) implementation

mod assignment;
mod chromosome;
mod domain;
mod fitness;
pub mod operators;
mod problem;

pub use assignment::{Assignment, Timeslot, Weekday};
pub use chromosome::TimetableChromosome;
pub use domain::DomainData;
pub use fitness::{FitnessBreakdown, TimetableFitness, CONFLICT_PENALTY};
pub use problem::TimetableProblem;
