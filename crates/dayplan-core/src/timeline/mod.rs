//! Wall-clock primitives shared by the scheduling pipeline.
//!
//! This module provides:
//! - A minutes-since-midnight time-of-day type
//! - Half-open time slots and the overlap test
//! - Free-interval (gap) detection inside a window

mod gap;
mod slot;
mod time_of_day;

pub use gap::{detect_time_gaps, GapSize, TimeGap, TimeGapDetector};
pub use slot::{intervals_overlap, TimeSlot};
pub use time_of_day::{TimeOfDay, MINUTES_PER_DAY};
