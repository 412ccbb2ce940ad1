//! Statistics module for dayplan
//!
//! Aggregate metrics derived from a finalized day schedule: work, focus
//! and break totals, peak-window energy utilization, schedule efficiency,
//! and completion counts.

mod schedule_analytics;

pub use schedule_analytics::{CompletionSummary, ScheduleAnalyzer, ScheduleMetrics};
