//! # Dayplan Core Library
//!
//! Core logic for the `dayplan` daily schedule optimizer. Given a day's task
//! collections and the user's working preferences, it produces one
//! non-overlapping, energy-aware timeline of blocks and tracks how each
//! block was completed. The `dayplan` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timeline**: minutes-since-midnight time values, half-open slots and
//!   free-gap detection
//! - **Schedule**: the block model, preferences and the completion state machine
//! - **Scheduler**: the staged optimization pipeline and the store-backed
//!   [`DayPlanner`] service
//! - **Stats**: schedule metrics and completion summaries
//! - **Storage**: TOML configuration plus in-memory and SQLite schedule stores
//!
//! ## Key Components
//!
//! - [`DayPlanner`]: generate, look up and update schedules
//! - [`ScheduleOptimizer`]: the pipeline on its own, without a store
//! - [`ScheduleStore`]: persistence seam
//! - [`Config`]: application configuration management

pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timeline;

pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use schedule::{
    BlockCategory, CompletionStatus, DaySchedule, EnergyLevel, Flexibility, Priority, TimeBlock,
    WorkSchedulePreferences,
};
pub use scheduler::{DayPlanner, ScheduleOptimizer, SchedulerConfig};
pub use stats::{CompletionSummary, ScheduleMetrics};
pub use storage::{Config, MemoryScheduleStore, ScheduleStore, SqliteScheduleStore};
pub use task::{ChecklistItem, DeepTask, TaskCollections};
pub use timeline::{TimeGap, TimeOfDay, TimeSlot};
