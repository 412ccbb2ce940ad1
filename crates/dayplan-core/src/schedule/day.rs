//! The aggregate produced by one optimizer run.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::block::{BlockCategory, TimeBlock};
use super::completion::CompletionStatus;
use super::preferences::WorkSchedulePreferences;
use crate::stats::{CompletionSummary, ScheduleMetrics};
use crate::timeline::TimeOfDay;

/// A finalized, analyzed schedule for one date.
///
/// Created by a full optimizer run and only mutated afterwards through
/// [`DaySchedule::update_block_completion`]. A later run for the same date
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub preferences: WorkSchedulePreferences,
    /// Positioned blocks sorted by start time
    pub time_blocks: Vec<TimeBlock>,
    #[serde(flatten)]
    pub metrics: ScheduleMetrics,
    pub is_optimized: bool,
    pub last_optimized: DateTime<Utc>,
    /// Incremented on every mutation
    pub version: u64,
    /// Source ids of candidates that could not be placed
    #[serde(default)]
    pub dropped_task_ids: Vec<String>,
}

impl DaySchedule {
    pub fn block(&self, block_id: &str) -> Option<&TimeBlock> {
        self.time_blocks.iter().find(|b| b.id == block_id)
    }

    pub fn contains_block(&self, block_id: &str) -> bool {
        self.block(block_id).is_some()
    }

    pub fn blocks_in_category(
        &self,
        category: BlockCategory,
    ) -> impl Iterator<Item = &TimeBlock> + '_ {
        self.time_blocks.iter().filter(move |b| b.category == category)
    }

    /// Update a block's completion status.
    ///
    /// Returns `false` when no block has `block_id`. Otherwise the status is
    /// applied, whatever it was before, and the schedule version is
    /// incremented.
    pub fn update_block_completion(
        &mut self,
        block_id: &str,
        status: CompletionStatus,
        actual_end_time: Option<TimeOfDay>,
    ) -> bool {
        let Some(block) = self.time_blocks.iter_mut().find(|b| b.id == block_id) else {
            return false;
        };

        block.set_completion(status, actual_end_time);
        self.version += 1;
        true
    }

    pub fn completion_summary(&self) -> CompletionSummary {
        CompletionSummary::from_blocks(&self.time_blocks)
    }
}
