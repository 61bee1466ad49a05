//! Input domain for the timetable search.
//!
//! [`DomainData`] is what the data provider hands to the engine: inclusive
//! id ranges for courses, teachers, rooms and student groups, the teaching
//! days and the available timeslots. The engine never generates or edits it.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::assignment::{Assignment, Timeslot, Weekday};
use crate::error::GaError;

/// Id ranges, days and slots that genes are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainData {
    pub courses: RangeInclusive<u32>,
    pub teachers: RangeInclusive<u32>,
    pub rooms: RangeInclusive<u32>,
    pub groups: RangeInclusive<u32>,
    pub days: Vec<Weekday>,
    pub timeslots: Vec<Timeslot>,
}

impl DomainData {
    /// Contiguous ids starting at 1, Monday–Friday, and one-hour slots from
    /// `first_hour` up to `last_hour`.
    ///
    /// ```
    /// use u_timetable::timetable::DomainData;
    ///
    /// let domain = DomainData::uniform(6, 8, 3, 7, 8, 14);
    /// assert_eq!(domain.encoding_length(), 6 * 7);
    /// assert_eq!(domain.timeslots.len(), 6);
    /// ```
    pub fn uniform(
        courses: u32,
        teachers: u32,
        rooms: u32,
        groups: u32,
        first_hour: u32,
        last_hour: u32,
    ) -> Self {
        Self {
            courses: 1..=courses,
            teachers: 1..=teachers,
            rooms: 1..=rooms,
            groups: 1..=groups,
            days: Weekday::WORKWEEK.to_vec(),
            timeslots: (first_hour..last_hour)
                .map(|h| Timeslot::hours(h, h + 1))
                .collect(),
        }
    }

    /// Number of genes per chromosome: one per (course, student group) pair.
    pub fn encoding_length(&self) -> usize {
        range_len(&self.courses) * range_len(&self.groups)
    }

    /// Checks that every domain is non-empty and every slot has positive length.
    pub fn validate(&self) -> Result<(), GaError> {
        for (name, range) in [
            ("courses", &self.courses),
            ("teachers", &self.teachers),
            ("rooms", &self.rooms),
            ("groups", &self.groups),
        ] {
            if range.is_empty() {
                return Err(GaError::Config(format!("{name} id range is empty")));
            }
        }
        if self.days.is_empty() {
            return Err(GaError::Config("no teaching days".into()));
        }
        if self.timeslots.is_empty() {
            return Err(GaError::Config("no timeslots".into()));
        }
        if let Some(slot) = self.timeslots.iter().find(|s| s.end <= s.start) {
            return Err(GaError::Config(format!(
                "timeslot {}..{} does not end after it starts",
                slot.start, slot.end
            )));
        }
        Ok(())
    }

    /// Draws one gene: every field independently and uniformly.
    ///
    /// # Panics
    /// Panics if any domain is empty; call [`validate`](Self::validate) first.
    pub fn random_assignment<R: Rng>(&self, rng: &mut R) -> Assignment {
        let course_id = rng.random_range(self.courses.clone());
        let teacher_id = rng.random_range(self.teachers.clone());
        let room_id = rng.random_range(self.rooms.clone());
        let group_id = rng.random_range(self.groups.clone());
        let day = self.days[rng.random_range(0..self.days.len())];
        let slot = self.timeslots[rng.random_range(0..self.timeslots.len())];
        Assignment::new(course_id, teacher_id, room_id, group_id, day, slot)
    }
}

fn range_len(range: &RangeInclusive<u32>) -> usize {
    if range.is_empty() {
        0
    } else {
        (range.end() - range.start()) as usize + 1
    }
}
