//! Recovery breaks after intensive blocks.

use tracing::debug;

use super::SchedulerConfig;
use crate::schedule::{BlockCategory, EnergyLevel, Flexibility, Priority, TimeBlock};
use crate::timeline::{TimeOfDay, TimeSlot};

/// Inserts a break into idle time that follows an intensive block.
///
/// Additive only: existing blocks are never moved or resized.
#[derive(Debug, Clone)]
pub struct TransitionBufferInserter {
    /// Idle minutes needed before a break is inserted
    min_gap: u32,
    /// Longest break inserted
    break_minutes: u32,
    /// Focus requirement that makes a block intensive
    focus_threshold: u8,
}

impl TransitionBufferInserter {
    pub fn new() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            min_gap: config.recovery_min_gap,
            break_minutes: config.recovery_break_minutes,
            focus_threshold: config.intensive_focus_threshold,
        }
    }

    /// Insert breaks and return how many were added. `blocks` ends up
    /// sorted by start time; unpositioned blocks sort first and are skipped.
    pub fn insert(&self, blocks: &mut Vec<TimeBlock>) -> usize {
        blocks.sort_by_key(|b| b.start_time);

        let mut breaks = Vec::new();
        let mut previous: Option<&TimeBlock> = None;

        for block in blocks.iter().filter(|b| b.is_positioned()) {
            if let (Some(prev), Some(start)) = (previous, block.start_time) {
                if let Some(recovery) = self.recovery_after(prev, start) {
                    breaks.push(recovery);
                }
            }

            // Track whichever block reaches furthest, so a short block nested
            // inside a long one does not open a phantom gap.
            let extends = match (previous.and_then(|p| p.end_time), block.end_time) {
                (Some(prev_end), Some(end)) => end > prev_end,
                _ => true,
            };
            if extends {
                previous = Some(block);
            }
        }

        let inserted = breaks.len();
        if inserted > 0 {
            blocks.extend(breaks);
            blocks.sort_by_key(|b| b.start_time);
        }
        inserted
    }

    fn recovery_after(&self, prev: &TimeBlock, next_start: TimeOfDay) -> Option<TimeBlock> {
        let prev_end = prev.end_time?;
        let gap = prev_end.minutes_until(next_start);
        if gap < self.min_gap || !prev.is_intensive(self.focus_threshold) {
            return None;
        }

        let slot = TimeSlot::starting_at(prev_end, gap.min(self.break_minutes))?;
        debug!(after = %prev.title, start = %slot.start, minutes = slot.duration_minutes(), "recovery break");

        let mut block = TimeBlock::new("Recovery break", BlockCategory::Break, slot.duration_minutes())
            .with_description(format!("Recovery after {}", prev.title))
            .with_energy(EnergyLevel::Low)
            .with_focus(1)
            .with_flexibility(Flexibility::Moveable)
            .with_priority(Priority::Low)
            .with_difficulty(1)
            .with_confidence(80)
            .with_tag("recovery");
        block.assign(slot);
        Some(block)
    }
}

impl Default for TransitionBufferInserter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn placed(title: &str, start: &str, minutes: u32, focus: u8, energy: EnergyLevel) -> TimeBlock {
        let mut block = TimeBlock::new(title, BlockCategory::DeepFocus, minutes)
            .with_focus(focus)
            .with_energy(energy);
        block.assign(block.slot_starting_at(t(start)).unwrap());
        block
    }

    fn breaks(blocks: &[TimeBlock]) -> Vec<(String, u32)> {
        blocks
            .iter()
            .filter(|b| b.category == BlockCategory::Break)
            .map(|b| (b.start_time.unwrap().to_string(), b.duration))
            .collect()
    }

    #[test]
    fn break_after_high_focus_block() {
        let mut blocks = vec![
            placed("Later", "11:00", 30, 4, EnergyLevel::Low),
            placed("Deep", "09:00", 90, 9, EnergyLevel::High),
        ];
        let inserted = TransitionBufferInserter::new().insert(&mut blocks);

        assert_eq!(inserted, 1);
        assert_eq!(breaks(&blocks), vec![("10:30".to_string(), 15)]);
        assert_eq!(blocks[1].category, BlockCategory::Break);
    }

    #[test]
    fn high_energy_alone_is_intensive() {
        let mut blocks = vec![
            placed("Workout", "07:00", 45, 4, EnergyLevel::High),
            placed("Next", "08:00", 30, 4, EnergyLevel::Low),
        ];
        assert_eq!(TransitionBufferInserter::new().insert(&mut blocks), 1);
        assert_eq!(breaks(&blocks), vec![("07:45".to_string(), 15)]);
    }

    #[test]
    fn no_break_for_short_gap_or_light_block() {
        let mut blocks = vec![
            placed("Deep", "09:00", 60, 9, EnergyLevel::High),
            placed("Light", "10:10", 30, 4, EnergyLevel::Low),
            placed("After light", "11:00", 30, 4, EnergyLevel::Low),
        ];
        assert_eq!(TransitionBufferInserter::new().insert(&mut blocks), 0);
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn break_is_capped_but_gap_length_is_used_when_shorter() {
        let config = SchedulerConfig {
            recovery_min_gap: 10,
            recovery_break_minutes: 20,
            ..Default::default()
        };
        let mut blocks = vec![
            placed("Deep", "09:00", 60, 9, EnergyLevel::High),
            placed("Next", "10:12", 30, 4, EnergyLevel::Low),
        ];
        TransitionBufferInserter::from_config(&config).insert(&mut blocks);
        assert_eq!(breaks(&blocks), vec![("10:00".to_string(), 12)]);
    }

    #[test]
    fn last_block_gets_no_break() {
        let mut blocks = vec![placed("Deep", "15:00", 60, 9, EnergyLevel::High)];
        assert_eq!(TransitionBufferInserter::new().insert(&mut blocks), 0);
    }
}
