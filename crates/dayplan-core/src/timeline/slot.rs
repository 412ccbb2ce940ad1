//! Half-open time intervals and the overlap test the scheduler relies on.

use serde::{Deserialize, Serialize};

use super::TimeOfDay;
use crate::error::ValidationError;

/// A `[start, end)` interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeSlot {
    /// Create a slot, rejecting empty or inverted ranges.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        let slot = Self { start, end };
        slot.validate()?;
        Ok(slot)
    }

    /// Slot of `minutes` length starting at `start`, if it ends before midnight.
    pub fn starting_at(start: TimeOfDay, minutes: u32) -> Option<Self> {
        start
            .checked_add_minutes(minutes)
            .map(|end| Self { start, end })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end <= self.start {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end)
    }

    /// Whether `time` lies inside `[start, end)`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether `other` lies entirely inside this slot.
    pub fn encloses(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        intervals_overlap(self.start, self.end, other.start, other.end)
    }
}

/// `[a_start, a_end)` and `[b_start, b_end)` share at least one minute.
pub fn intervals_overlap(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}
