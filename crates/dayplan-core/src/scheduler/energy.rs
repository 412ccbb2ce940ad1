//! Energy-aware placement: routine chain from wake time, high-energy work
//! into peak windows.

use std::cmp::Reverse;

use tracing::{debug, warn};

use super::ScheduleDraft;
use crate::schedule::{BlockCategory, EnergyLevel, TimeBlock, WorkSchedulePreferences};
use crate::timeline::TimeSlot;

/// Stable sort by priority, then energy requirement, both descending.
pub fn sort_candidates(candidates: &mut [TimeBlock]) {
    candidates.sort_by_key(|b| (Reverse(b.priority), Reverse(b.energy_requirement)));
}

/// Places the morning routine and high-energy candidates.
#[derive(Debug, Clone, Default)]
pub struct EnergyAwareScheduler;

impl EnergyAwareScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Position what this stage owns and leave everything else in
    /// `draft.unplaced`, sorted for the gap filler.
    pub fn schedule(&self, draft: &mut ScheduleDraft, preferences: &WorkSchedulePreferences) {
        let mut candidates = std::mem::take(&mut draft.unplaced);
        sort_candidates(&mut candidates);

        let (routine, rest): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|b| b.category == BlockCategory::MorningRoutine);

        self.chain_routine(draft, routine, preferences);

        for mut block in rest {
            if block.energy_requirement == EnergyLevel::High {
                if let Some(slot) = Self::find_peak_slot(&block, &draft.scheduled, preferences) {
                    debug!(title = %block.title, start = %slot.start, "placed in peak window");
                    block.confidence = 90;
                    block.assign(slot);
                    draft.scheduled.push(block);
                    continue;
                }
            }
            draft.unplaced.push(block);
        }
    }

    /// Sequence routine steps from wake time, `transition_buffer` apart.
    fn chain_routine(
        &self,
        draft: &mut ScheduleDraft,
        routine: Vec<TimeBlock>,
        preferences: &WorkSchedulePreferences,
    ) {
        let mut cursor = Some(preferences.wake_up_time);

        for mut block in routine {
            let slot = cursor.and_then(|start| block.slot_starting_at(start));
            match slot {
                Some(slot) => {
                    block.assign(slot);
                    cursor = slot.end.checked_add_minutes(preferences.transition_buffer);
                    draft.scheduled.push(block);
                }
                None => {
                    // A broken chain cannot resume later: every further step depends on this one.
                    warn!(title = %block.title, "routine step runs past midnight, dropping");
                    cursor = None;
                    draft.dropped.push(block);
                }
            }
        }
    }

    /// First peak window whose start can hold the whole block without
    /// overlapping anything already scheduled.
    fn find_peak_slot(
        block: &TimeBlock,
        scheduled: &[TimeBlock],
        preferences: &WorkSchedulePreferences,
    ) -> Option<TimeSlot> {
        preferences.deep_work_peak_times.iter().find_map(|peak| {
            let candidate = block.slot_starting_at(peak.start)?;
            let fits = peak.encloses(&candidate)
                && !scheduled
                    .iter()
                    .filter_map(TimeBlock::slot)
                    .any(|taken| taken.overlaps(&candidate));
            fits.then_some(candidate)
        })
    }
}
