//! Greedy assignment of leftover candidates to free gaps in the work window.

use tracing::{debug, warn};

use super::ScheduleDraft;
use crate::schedule::{TimeBlock, WorkSchedulePreferences};
use crate::timeline::{TimeGapDetector, TimeSlot};

/// Fills each free gap with at most one waiting candidate.
#[derive(Debug, Clone, Default)]
pub struct GapFiller;

impl GapFiller {
    pub fn new() -> Self {
        Self
    }

    /// One pass over the gaps in chronological order. Each gap takes the
    /// first waiting candidate (in draft order) that fits, positioned at the
    /// gap start. Whatever is still waiting afterwards is dropped.
    pub fn fill(&self, draft: &mut ScheduleDraft, preferences: &WorkSchedulePreferences) {
        let occupied: Vec<TimeSlot> = draft.scheduled.iter().filter_map(TimeBlock::slot).collect();
        let gaps = TimeGapDetector::new().find_gaps(
            &occupied,
            preferences.work_start_time,
            preferences.work_end_time,
        );

        for gap in gaps {
            let Some(index) = draft.unplaced.iter().position(|b| gap.can_fit(b.duration)) else {
                continue;
            };

            let mut block = draft.unplaced.remove(index);
            if let Some(slot) = block.slot_starting_at(gap.start_time) {
                debug!(title = %block.title, start = %slot.start, "filled gap");
                block.confidence = 70;
                block.assign(slot);
                draft.scheduled.push(block);
            }
        }

        for block in draft.unplaced.drain(..) {
            warn!(
                title = %block.title,
                duration = block.duration,
                sources = ?block.source_task_ids,
                "no gap fits candidate, dropping from schedule"
            );
            draft.dropped.push(block);
        }
    }
}
