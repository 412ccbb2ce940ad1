//! Store-backed planning service.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{ScheduleOptimizer, SchedulerConfig};
use crate::error::{CoreError, Result};
use crate::schedule::{CompletionStatus, DaySchedule, WorkSchedulePreferences};
use crate::storage::ScheduleStore;
use crate::task::TaskCollections;
use crate::timeline::TimeOfDay;

/// Generates schedules and tracks block completion against a
/// [`ScheduleStore`].
pub struct DayPlanner<S: ScheduleStore> {
    optimizer: ScheduleOptimizer,
    store: S,
}

impl<S: ScheduleStore> DayPlanner<S> {
    pub fn new(store: S) -> Self {
        Self {
            optimizer: ScheduleOptimizer::new(),
            store,
        }
    }

    pub fn with_config(store: S, config: SchedulerConfig) -> Self {
        Self {
            optimizer: ScheduleOptimizer::with_config(config),
            store,
        }
    }

    /// Build a fresh schedule for `date` and store it, replacing any
    /// schedule already stored for that date.
    ///
    /// The version continues from the replaced schedule so callers can tell
    /// a regeneration from a first run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad preferences, or a storage error if
    /// the store cannot be read or written.
    pub fn generate_optimal_schedule(
        &mut self,
        date: NaiveDate,
        preferences: &WorkSchedulePreferences,
        tasks: &TaskCollections,
    ) -> Result<DaySchedule> {
        let mut schedule = self.optimizer.optimize(date, preferences, tasks)?;

        if let Some(previous) = self.store.load(date)? {
            schedule.version = previous.version + 1;
            debug!(%date, version = schedule.version, "replacing stored schedule");
        }

        self.store.save(&schedule)?;
        Ok(schedule)
    }

    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn get_schedule_for_date(&self, date: NaiveDate) -> Result<Option<DaySchedule>> {
        self.store.load(date)
    }

    /// Update one block's completion status wherever it is stored.
    ///
    /// Returns `Ok(false)` when no stored schedule contains `block_id`. Any
    /// status change is applied and bumps the stored version.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or [`CoreError::Custom`] when the block index
    /// disagrees with the stored schedule.
    pub fn update_block_completion(
        &mut self,
        block_id: &str,
        status: CompletionStatus,
        actual_end_time: Option<TimeOfDay>,
    ) -> Result<bool> {
        let Some(date) = self.store.find_block_date(block_id)? else {
            debug!(block_id, "completion update for unknown block");
            return Ok(false);
        };
        let Some(mut schedule) = self.store.load(date)? else {
            debug!(block_id, %date, "block index points at a missing schedule");
            return Ok(false);
        };

        if let Some(current) = schedule.block(block_id).map(|b| b.completion_status) {
            if !current.can_transition_to(&status) {
                debug!(block_id, from = %current, to = %status, "completion moved outside the usual flow");
            }
        }

        if !schedule.update_block_completion(block_id, status, actual_end_time) {
            return Err(CoreError::Custom(format!(
                "block index for {block_id} is stale: not present in schedule for {date}"
            )));
        }

        self.store.save(&schedule)?;
        info!(block_id, %status, %date, version = schedule.version, "block completion updated");
        Ok(true)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
