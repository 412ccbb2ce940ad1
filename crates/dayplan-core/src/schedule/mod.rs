//! Schedule model: time blocks, preferences, and the day aggregate.

mod block;
mod completion;
mod day;
mod preferences;

pub use block::{BlockCategory, EnergyLevel, Flexibility, Priority, TimeBlock};
pub use completion::CompletionStatus;
pub use day::DaySchedule;
pub use preferences::WorkSchedulePreferences;
