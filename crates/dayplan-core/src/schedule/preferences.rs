//! Per-day scheduling preferences.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timeline::{TimeOfDay, TimeSlot};

/// User scheduling preferences, read-only for the duration of a run.
///
/// Fields also accept their camelCase spellings (`wakeUpTime`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedulePreferences {
    #[serde(default = "default_wake_up_time", alias = "wakeUpTime")]
    pub wake_up_time: TimeOfDay,
    #[serde(default = "default_work_start_time", alias = "workStartTime")]
    pub work_start_time: TimeOfDay,
    #[serde(default = "default_work_end_time", alias = "workEndTime")]
    pub work_end_time: TimeOfDay,
    #[serde(default = "default_lunch_time", alias = "lunchTime")]
    pub lunch_time: TimeOfDay,
    /// Minutes; zero disables the lunch anchor
    #[serde(default = "default_lunch_duration", alias = "lunchDuration")]
    pub lunch_duration: u32,
    /// Minutes between consecutive routine steps
    #[serde(default = "default_transition_buffer", alias = "transitionBuffer")]
    pub transition_buffer: u32,
    /// Preferred windows for high-energy work, in preference order
    #[serde(
        default = "default_deep_work_peak_times",
        alias = "deepWorkPeakTimes"
    )]
    pub deep_work_peak_times: Vec<TimeSlot>,
    /// Extra fixed break anchors
    #[serde(default, alias = "fixedBreaks")]
    pub fixed_breaks: Vec<TimeSlot>,
}

fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

fn default_wake_up_time() -> TimeOfDay {
    hm(6, 30)
}
fn default_work_start_time() -> TimeOfDay {
    hm(9, 0)
}
fn default_work_end_time() -> TimeOfDay {
    hm(17, 0)
}
fn default_lunch_time() -> TimeOfDay {
    hm(12, 0)
}
fn default_lunch_duration() -> u32 {
    60
}
fn default_transition_buffer() -> u32 {
    5
}
fn default_deep_work_peak_times() -> Vec<TimeSlot> {
    vec![
        TimeSlot {
            start: hm(9, 0),
            end: hm(12, 0),
        },
        TimeSlot {
            start: hm(14, 0),
            end: hm(16, 0),
        },
    ]
}

impl Default for WorkSchedulePreferences {
    fn default() -> Self {
        Self {
            wake_up_time: default_wake_up_time(),
            work_start_time: default_work_start_time(),
            work_end_time: default_work_end_time(),
            lunch_time: default_lunch_time(),
            lunch_duration: default_lunch_duration(),
            transition_buffer: default_transition_buffer(),
            deep_work_peak_times: default_deep_work_peak_times(),
            fixed_breaks: Vec::new(),
        }
    }
}

impl WorkSchedulePreferences {
    /// Check the range constraints the time type cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_start_time >= self.work_end_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.work_start_time.to_string(),
                end: self.work_end_time.to_string(),
            });
        }
        for slot in self.deep_work_peak_times.iter().chain(&self.fixed_breaks) {
            slot.validate()?;
        }
        Ok(())
    }

    /// Total minutes across all peak windows.
    pub fn peak_minutes(&self) -> u32 {
        self.deep_work_peak_times
            .iter()
            .map(TimeSlot::duration_minutes)
            .sum()
    }

    /// Whether `time` falls inside any peak window.
    pub fn is_peak_time(&self, time: TimeOfDay) -> bool {
        self.deep_work_peak_times.iter().any(|slot| slot.contains(time))
    }
}
