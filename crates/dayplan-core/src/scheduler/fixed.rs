//! Anchor blocks positioned straight from preferences.

use tracing::warn;

use crate::schedule::{BlockCategory, EnergyLevel, Flexibility, Priority, TimeBlock, WorkSchedulePreferences};
use crate::timeline::TimeSlot;

/// Builds lunch and fixed-break anchors. Later stages never move these.
#[derive(Debug, Clone, Default)]
pub struct FixedBlockBuilder;

impl FixedBlockBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, preferences: &WorkSchedulePreferences) -> Vec<TimeBlock> {
        let mut anchors = Vec::new();

        if preferences.lunch_duration > 0 {
            match TimeSlot::starting_at(preferences.lunch_time, preferences.lunch_duration) {
                Some(slot) => anchors.push(Self::anchor("Lunch", BlockCategory::Meal, slot)),
                None => warn!(
                    lunch_time = %preferences.lunch_time,
                    lunch_duration = preferences.lunch_duration,
                    "lunch crosses midnight, skipping anchor"
                ),
            }
        }

        for slot in &preferences.fixed_breaks {
            anchors.push(Self::anchor("Break", BlockCategory::Break, *slot));
        }

        anchors
    }

    fn anchor(title: &str, category: BlockCategory, slot: TimeSlot) -> TimeBlock {
        let mut block = TimeBlock::new(title, category, slot.duration_minutes())
            .with_energy(EnergyLevel::Low)
            .with_focus(1)
            .with_flexibility(Flexibility::Fixed)
            .with_priority(Priority::High)
            .with_difficulty(1)
            .with_confidence(100);
        block.assign(slot);
        block
    }
}
