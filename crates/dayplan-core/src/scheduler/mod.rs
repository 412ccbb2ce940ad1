//! Daily schedule optimizer.
//!
//! Turns a day's task collections into one non-overlapping, energy-aware
//! [`DaySchedule`]. Stages run strictly in order, each consuming the
//! previous stage's output:
//! 1. [`TaskBlockConverter`] builds unpositioned candidates
//! 2. [`FixedBlockBuilder`] positions anchors (lunch, fixed breaks)
//! 3. [`EnergyAwareScheduler`] chains the morning routine and puts
//!    high-energy work into peak windows
//! 4. [`GapFiller`] assigns leftovers to free gaps in the work window
//! 5. [`TransitionBufferInserter`] adds recovery breaks after intensive blocks
//! 6. [`ConflictResolver`] trims any remaining overlap
//! 7. [`ScheduleAnalyzer`] derives the metrics
//!
//! Placement is greedy first-fit. Candidates that fit nowhere are left out
//! of the schedule and reported through `dropped_task_ids`.

mod conflict;
mod convert;
mod energy;
mod fixed;
mod gap_fill;
mod planner;
mod transition;

pub use conflict::{detect_conflicts, BlockConflict, ConflictResolution, ConflictResolver};
pub use convert::{estimate_routine_minutes, TaskBlockConverter};
pub use energy::{sort_candidates, EnergyAwareScheduler};
pub use fixed::FixedBlockBuilder;
pub use gap_fill::GapFiller;
pub use planner::DayPlanner;
pub use transition::TransitionBufferInserter;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::schedule::{DaySchedule, TimeBlock, WorkSchedulePreferences};
use crate::stats::ScheduleAnalyzer;
use crate::task::TaskCollections;

/// Scheduler tunables. Defaults match the documented pipeline constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Routine step duration when no keyword matches (minutes)
    pub routine_default_minutes: u32,
    /// Deep task duration when the task has no estimate (minutes)
    pub deep_focus_default_minutes: u32,
    /// Light task duration (minutes)
    pub light_task_minutes: u32,
    /// Lower bound for the merged workout block (minutes)
    pub workout_min_minutes: u32,
    /// Workout minutes per checklist item
    pub workout_minutes_per_item: u32,
    /// Merged health block duration (minutes)
    pub health_minutes: u32,
    /// Idle gap that earns a recovery break (minutes)
    pub recovery_min_gap: u32,
    /// Longest recovery break inserted (minutes)
    pub recovery_break_minutes: u32,
    /// Focus requirement at which a block counts as intensive
    pub intensive_focus_threshold: u8,
    /// Efficiency points lost per off-peak high-energy block
    pub off_peak_penalty: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            routine_default_minutes: 10,
            deep_focus_default_minutes: 90,
            light_task_minutes: 30,
            workout_min_minutes: 45,
            workout_minutes_per_item: 5,
            health_minutes: 20,
            recovery_min_gap: 15,
            recovery_break_minutes: 15,
            intensive_focus_threshold: 7,
            off_peak_penalty: 10,
        }
    }
}

/// Working state handed from stage to stage.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    /// Positioned blocks
    pub scheduled: Vec<TimeBlock>,
    /// Candidates still waiting for a position, in placement order
    pub unplaced: Vec<TimeBlock>,
    /// Candidates given up on
    pub dropped: Vec<TimeBlock>,
}

impl ScheduleDraft {
    pub fn new(anchors: Vec<TimeBlock>, candidates: Vec<TimeBlock>) -> Self {
        Self {
            scheduled: anchors,
            unplaced: candidates,
            dropped: Vec::new(),
        }
    }
}

/// Runs the full pipeline without touching any store.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptimizer {
    config: SchedulerConfig,
}

impl ScheduleOptimizer {
    /// Create an optimizer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build a fresh schedule for `date`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the preferences describe an empty work
    /// window or an empty/inverted slot. Placement problems never fail: they
    /// show up as `dropped_task_ids`.
    pub fn optimize(
        &self,
        date: NaiveDate,
        preferences: &WorkSchedulePreferences,
        tasks: &TaskCollections,
    ) -> Result<DaySchedule> {
        preferences.validate()?;

        let candidates = TaskBlockConverter::new(&self.config).convert(tasks);
        let anchors = FixedBlockBuilder::new().build(preferences);
        debug!(
            %date,
            candidates = candidates.len(),
            anchors = anchors.len(),
            "starting schedule optimization"
        );

        let mut draft = ScheduleDraft::new(anchors, candidates);
        EnergyAwareScheduler::new().schedule(&mut draft, preferences);
        GapFiller::new().fill(&mut draft, preferences);

        let breaks = TransitionBufferInserter::from_config(&self.config).insert(&mut draft.scheduled);
        debug!(%date, breaks, "inserted recovery breaks");

        let resolution = ConflictResolver::new().resolve(std::mem::take(&mut draft.scheduled));
        draft.dropped.extend(resolution.removed);

        let metrics = ScheduleAnalyzer::new()
            .with_focus_threshold(self.config.intensive_focus_threshold)
            .with_off_peak_penalty(self.config.off_peak_penalty)
            .analyze(&resolution.blocks, preferences);

        let mut dropped_task_ids: Vec<String> = Vec::new();
        for id in draft.dropped.iter().flat_map(|b| b.source_task_ids.iter()) {
            if !dropped_task_ids.contains(id) {
                dropped_task_ids.push(id.clone());
            }
        }

        info!(
            %date,
            blocks = resolution.blocks.len(),
            dropped = dropped_task_ids.len(),
            repaired = resolution.truncated,
            efficiency = metrics.schedule_efficiency,
            "generated day schedule"
        );

        Ok(DaySchedule {
            date,
            preferences: preferences.clone(),
            time_blocks: resolution.blocks,
            metrics,
            is_optimized: true,
            last_optimized: Utc::now(),
            version: 1,
            dropped_task_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::BlockCategory;
    use crate::task::{ChecklistItem, DeepTask};
    use crate::timeline::TimeOfDay;
    use crate::Priority;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn find<'a>(schedule: &'a DaySchedule, title: &str) -> &'a TimeBlock {
        schedule
            .time_blocks
            .iter()
            .find(|b| b.title == title)
            .unwrap_or_else(|| panic!("block '{title}' not scheduled"))
    }

    #[test]
    fn test_schedule_generation() {
        let tasks = TaskCollections {
            morning_tasks: vec![ChecklistItem::new("m1", "Shower")],
            deep_tasks: vec![DeepTask::new("d1", "Write design doc").with_duration(90)],
            light_tasks: vec![ChecklistItem::new("l1", "Answer email")],
            workout_tasks: vec![ChecklistItem::new("w1", "Squats")],
            health_tasks: vec![ChecklistItem::new("h1", "Vitamins")],
        };

        // One candidate per gap: the afternoon break splits the afternoon so
        // every merged block finds a gap.
        let prefs = WorkSchedulePreferences {
            fixed_breaks: vec![crate::timeline::TimeSlot {
                start: t("15:00"),
                end: t("15:15"),
            }],
            ..Default::default()
        };
        let schedule = ScheduleOptimizer::new().optimize(date(), &prefs, &tasks).unwrap();

        assert!(schedule.is_optimized);
        assert_eq!(schedule.version, 1);
        assert!(schedule.dropped_task_ids.is_empty());
        for category in [
            BlockCategory::MorningRoutine,
            BlockCategory::DeepFocus,
            BlockCategory::LightFocus,
            BlockCategory::Workout,
            BlockCategory::Health,
            BlockCategory::Meal,
        ] {
            assert_eq!(schedule.blocks_in_category(category).count(), 1, "{category:?}");
        }
        assert_eq!(find(&schedule, "Write design doc").start_time, Some(t("09:00")));
    }

    #[test]
    fn test_lunch_avoidance() {
        let prefs = WorkSchedulePreferences {
            deep_work_peak_times: Vec::new(),
            ..Default::default()
        };
        let tasks = TaskCollections {
            deep_tasks: vec![
                DeepTask::new("d1", "First").with_duration(150),
                DeepTask::new("d2", "Second").with_duration(60),
            ],
            ..Default::default()
        };

        let schedule = ScheduleOptimizer::new().optimize(date(), &prefs, &tasks).unwrap();
        let lunch = schedule.blocks_in_category(BlockCategory::Meal).next().unwrap();
        for block in schedule.time_blocks.iter().filter(|b| b.id != lunch.id) {
            assert!(!block.overlaps(lunch), "{} overlaps lunch", block.title);
        }
    }

    #[test]
    fn test_task_priority_ordering() {
        let prefs = WorkSchedulePreferences {
            deep_work_peak_times: vec![crate::timeline::TimeSlot {
                start: t("09:00"),
                end: t("10:00"),
            }],
            ..Default::default()
        };
        let tasks = TaskCollections {
            deep_tasks: vec![
                DeepTask::new("low", "Low").with_duration(60).with_priority(Priority::Low),
                DeepTask::new("high", "High").with_duration(60).with_priority(Priority::Critical),
            ],
            ..Default::default()
        };

        let schedule = ScheduleOptimizer::new().optimize(date(), &prefs, &tasks).unwrap();
        assert_eq!(find(&schedule, "High").start_time, Some(t("09:00")));
        assert_ne!(find(&schedule, "Low").start_time, Some(t("09:00")));
    }

    #[test]
    fn test_invalid_preferences_rejected() {
        let prefs = WorkSchedulePreferences {
            work_start_time: t("17:00"),
            work_end_time: t("17:00"),
            ..Default::default()
        };
        let result = ScheduleOptimizer::new().optimize(date(), &prefs, &TaskCollections::default());
        assert!(matches!(result, Err(crate::CoreError::Validation(_))));
    }

    #[test]
    fn test_empty_collections_yield_only_anchors() {
        let schedule = ScheduleOptimizer::new()
            .optimize(date(), &WorkSchedulePreferences::default(), &TaskCollections::default())
            .unwrap();
        assert_eq!(schedule.time_blocks.len(), 1);
        assert_eq!(schedule.time_blocks[0].category, BlockCategory::Meal);
        assert_eq!(schedule.metrics.total_work_time, 0);
        assert_eq!(schedule.metrics.schedule_efficiency, 100);
    }
}
