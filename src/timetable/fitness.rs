//! Timetable fitness.
//!
//! Scoring starts at [`MAX_FITNESS`] and subtracts penalties:
//!
//! | Constraint | Kind | Penalty |
//! |---|---|---|
//! | teacher double-booked | hard | 10 per overlapping pair |
//! | group double-booked | hard | 10 per overlapping pair |
//! | room double-booked | hard | 10 per overlapping pair |
//! | teacher workload spread | soft | `max(hours) - min(hours)` |
//! | teacher idle time | soft | idle minutes between lessons |
//! | group idle time | soft | idle minutes between lessons |
//!
//! The score is floored at 0.

use std::collections::HashMap;

use super::assignment::Assignment;
use super::chromosome::TimetableChromosome;
use crate::ga::MAX_FITNESS;

/// Penalty for each overlapping pair of assignments.
pub const CONFLICT_PENALTY: u64 = 10;

/// Penalty components of one schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitnessBreakdown {
    pub teacher_conflicts: u64,
    pub group_conflicts: u64,
    pub room_conflicts: u64,
    /// Difference between the busiest and the least busy teacher, in hours.
    pub workload_spread: u64,
    pub teacher_gap_minutes: u64,
    pub group_gap_minutes: u64,
}

impl FitnessBreakdown {
    /// Computes every penalty component of `schedule`.
    pub fn of(schedule: &[Assignment]) -> Self {
        let by_teacher = bucket(schedule, |a| a.teacher_id);
        let by_group = bucket(schedule, |a| a.group_id);
        let by_room = bucket(schedule, |a| a.room_id);

        let hours: Vec<u64> = by_teacher
            .values()
            .map(|lessons| lessons.iter().map(|a| u64::from(a.whole_hours())).sum())
            .collect();
        let workload_spread = match (hours.iter().max(), hours.iter().min()) {
            (Some(max), Some(min)) if hours.len() > 1 => max - min,
            _ => 0,
        };

        Self {
            teacher_conflicts: by_teacher.values().map(|b| overlapping_pairs(b)).sum(),
            group_conflicts: by_group.values().map(|b| overlapping_pairs(b)).sum(),
            room_conflicts: by_room.values().map(|b| overlapping_pairs(b)).sum(),
            workload_spread,
            teacher_gap_minutes: by_teacher.values().map(|b| idle_minutes(b)).sum(),
            group_gap_minutes: by_group.values().map(|b| idle_minutes(b)).sum(),
        }
    }

    pub fn hard_conflicts(&self) -> u64 {
        self.teacher_conflicts + self.group_conflicts + self.room_conflicts
    }

    /// Total amount subtracted from the maximum score.
    pub fn penalty(&self) -> u64 {
        self.hard_conflicts() * CONFLICT_PENALTY
            + self.workload_spread
            + self.teacher_gap_minutes
            + self.group_gap_minutes
    }

    /// Final score in `[0, MAX_FITNESS]`.
    pub fn score(&self) -> f64 {
        (MAX_FITNESS - self.penalty() as f64).max(0.0)
    }
}

/// Scores timetable chromosomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimetableFitness;

impl TimetableFitness {
    pub fn evaluate(&self, chromosome: &TimetableChromosome) -> f64 {
        self.evaluate_schedule(chromosome.schedule())
    }

    /// Scores a raw schedule. An empty schedule scores [`MAX_FITNESS`].
    pub fn evaluate_schedule(&self, schedule: &[Assignment]) -> f64 {
        if schedule.is_empty() {
            return MAX_FITNESS;
        }
        FitnessBreakdown::of(schedule).score()
    }
}

/// Groups assignments by `key`, each bucket sorted by (day, start).
fn bucket<F>(schedule: &[Assignment], key: F) -> HashMap<u32, Vec<&Assignment>>
where
    F: Fn(&Assignment) -> u32,
{
    let mut buckets: HashMap<u32, Vec<&Assignment>> = HashMap::new();
    for a in schedule {
        buckets.entry(key(a)).or_default().push(a);
    }
    for lessons in buckets.values_mut() {
        lessons.sort_by_key(|a| (a.day, a.start));
    }
    buckets
}

/// Consecutive same-day pairs where the first runs past the second's start.
fn overlapping_pairs(sorted: &[&Assignment]) -> u64 {
    sorted
        .windows(2)
        .filter(|w| w[0].day == w[1].day && w[0].end > w[1].start)
        .count() as u64
}

/// Idle minutes between consecutive same-day lessons that do not overlap.
fn idle_minutes(sorted: &[&Assignment]) -> u64 {
    sorted
        .windows(2)
        .filter(|w| w[0].day == w[1].day && w[0].end < w[1].start)
        .map(|w| u64::from(w[1].start - w[0].end))
        .sum()
}
