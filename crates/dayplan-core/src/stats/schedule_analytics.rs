//! Aggregate metrics for a finalized day schedule.
//!
//! All metrics are pure functions of the positioned blocks and the
//! preferences they were scheduled against:
//! - **Work time**: deep-focus plus light-focus minutes
//! - **Focus time**: minutes of blocks at or above the focus threshold
//! - **Break time**: minutes of break blocks
//! - **Energy utilization**: high-energy minutes as a share of peak minutes
//! - **Efficiency**: 100 minus a penalty per high-energy block that starts
//!   outside every peak window

use serde::{Deserialize, Serialize};

use crate::schedule::{BlockCategory, CompletionStatus, EnergyLevel, TimeBlock, WorkSchedulePreferences};

/// Metrics stored on every [`crate::schedule::DaySchedule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Minutes
    pub total_work_time: u32,
    /// Minutes
    pub total_focus_time: u32,
    /// Minutes
    pub total_break_time: u32,
    /// Percentage (0.0 to 100.0)
    pub energy_utilization: f64,
    /// Score (0 to 100)
    pub schedule_efficiency: u32,
}

/// Computes [`ScheduleMetrics`] from a block set.
#[derive(Debug, Clone)]
pub struct ScheduleAnalyzer {
    /// Blocks with at least this focus requirement count as focus time
    focus_threshold: u8,
    /// Efficiency points lost per off-peak high-energy block
    off_peak_penalty: u32,
}

impl ScheduleAnalyzer {
    pub fn new() -> Self {
        Self {
            focus_threshold: 7,
            off_peak_penalty: 10,
        }
    }

    pub fn with_focus_threshold(mut self, threshold: u8) -> Self {
        self.focus_threshold = threshold;
        self
    }

    pub fn with_off_peak_penalty(mut self, penalty: u32) -> Self {
        self.off_peak_penalty = penalty;
        self
    }

    /// Analyze positioned blocks. Unpositioned blocks are ignored.
    pub fn analyze(
        &self,
        blocks: &[TimeBlock],
        preferences: &WorkSchedulePreferences,
    ) -> ScheduleMetrics {
        let positioned: Vec<&TimeBlock> = blocks.iter().filter(|b| b.is_positioned()).collect();

        let total_work_time = positioned
            .iter()
            .filter(|b| b.category.is_work())
            .map(|b| b.duration)
            .sum();

        let total_focus_time = positioned
            .iter()
            .filter(|b| b.focus_requirement >= self.focus_threshold)
            .map(|b| b.duration)
            .sum();

        let total_break_time = positioned
            .iter()
            .filter(|b| b.category == BlockCategory::Break)
            .map(|b| b.duration)
            .sum();

        let high_energy: Vec<&&TimeBlock> = positioned
            .iter()
            .filter(|b| b.energy_requirement == EnergyLevel::High)
            .collect();

        let high_energy_minutes: u32 = high_energy.iter().map(|b| b.duration).sum();
        let peak_minutes = preferences.peak_minutes();
        let energy_utilization = if peak_minutes == 0 {
            0.0
        } else {
            (f64::from(high_energy_minutes) / f64::from(peak_minutes) * 100.0).min(100.0)
        };

        let off_peak = high_energy
            .iter()
            .filter(|b| {
                b.start_time
                    .map(|start| !preferences.is_peak_time(start))
                    .unwrap_or(false)
            })
            .count() as u32;
        let schedule_efficiency = 100u32.saturating_sub(off_peak.saturating_mul(self.off_peak_penalty));

        ScheduleMetrics {
            total_work_time,
            total_focus_time,
            total_break_time,
            energy_utilization,
            schedule_efficiency,
        }
    }
}

impl Default for ScheduleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Block counts per completion status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub skipped: u32,
    pub cancelled: u32,
    /// Ratio of completed blocks (0.0 to 1.0)
    pub completion_rate: f64,
}

impl CompletionSummary {
    pub fn from_blocks(blocks: &[TimeBlock]) -> Self {
        let mut summary = Self::default();
        for block in blocks {
            summary.total += 1;
            match block.completion_status {
                CompletionStatus::Pending => summary.pending += 1,
                CompletionStatus::InProgress => summary.in_progress += 1,
                CompletionStatus::Completed => summary.completed += 1,
                CompletionStatus::Skipped => summary.skipped += 1,
                CompletionStatus::Cancelled => summary.cancelled += 1,
            }
        }
        if summary.total > 0 {
            summary.completion_rate = f64::from(summary.completed) / f64::from(summary.total);
        }
        summary
    }
}
