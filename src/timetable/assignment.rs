//! The timetable gene: one course taught by one teacher to one group in one
//! room at one day/time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the school week.
///
/// Ordering follows the calendar week starting on Monday; fitness sorts
/// assignments by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Friday.
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];
}

/// A teaching period, in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    pub start: u32,
    pub end: u32,
}

impl Timeslot {
    /// Creates a slot from `start` to `end` minutes after midnight.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates a slot spanning whole hours, e.g. `Timeslot::hours(8, 9)`.
    pub fn hours(start_hour: u32, end_hour: u32) -> Self {
        Self::new(start_hour * 60, end_hour * 60)
    }

    /// Length of the slot in minutes.
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// One scheduling decision. Immutable once created: mutation replaces a
/// whole assignment, never a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub course_id: u32,
    pub teacher_id: u32,
    pub room_id: u32,
    pub group_id: u32,
    pub day: Weekday,
    /// Minutes after midnight.
    pub start: u32,
    /// Minutes after midnight.
    pub end: u32,
}

impl Assignment {
    /// Places the given course/teacher/room/group into a day and slot.
    pub fn new(
        course_id: u32,
        teacher_id: u32,
        room_id: u32,
        group_id: u32,
        day: Weekday,
        slot: Timeslot,
    ) -> Self {
        Self {
            course_id,
            teacher_id,
            room_id,
            group_id,
            day,
            start: slot.start,
            end: slot.end,
        }
    }

    pub fn slot(&self) -> Timeslot {
        Timeslot::new(self.start, self.end)
    }

    /// Whole teaching hours covered by this assignment (truncated).
    pub fn whole_hours(&self) -> u32 {
        self.slot().duration() / 60
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "course {} | teacher {} | room {} | group {} | {:?} {:02}:{:02}-{:02}:{:02}",
            self.course_id,
            self.teacher_id,
            self.room_id,
            self.group_id,
            self.day,
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60,
        )
    }
}
