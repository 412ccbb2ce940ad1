//! Conversion of external task collections into unpositioned blocks.

use tracing::debug;

use super::SchedulerConfig;
use crate::schedule::{
    BlockCategory, CompletionStatus, EnergyLevel, Flexibility, Priority, TimeBlock,
};
use crate::task::{ChecklistItem, DeepTask, TaskCollections};

/// Routine step durations by title keyword (minutes). First match wins.
const ROUTINE_DURATIONS: &[(&str, u32)] = &[
    ("shower", 15),
    ("meditat", 10),
    ("breakfast", 20),
    ("yoga", 20),
    ("walk", 20),
    ("read", 20),
    ("exercise", 30),
    ("stretch", 10),
    ("journal", 10),
    ("plan", 10),
    ("dress", 10),
    ("skincare", 5),
    ("coffee", 5),
    ("make bed", 3),
    ("teeth", 3),
    ("vitamin", 2),
    ("water", 2),
];

/// Deep tasks longer than this are marked splittable.
const SPLITTABLE_AFTER_MINUTES: u32 = 90;

/// Estimate a routine step from its title, falling back to `default_minutes`.
pub fn estimate_routine_minutes(title: &str, default_minutes: u32) -> u32 {
    let title = title.to_lowercase();
    ROUTINE_DURATIONS
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, minutes)| *minutes)
        .unwrap_or(default_minutes)
}

fn status_for(completed: bool) -> CompletionStatus {
    if completed {
        CompletionStatus::Completed
    } else {
        CompletionStatus::Pending
    }
}

/// Maps task collections to block candidates with empty positions.
pub struct TaskBlockConverter {
    config: SchedulerConfig,
}

impl TaskBlockConverter {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Convert all five collections. Order: routine chain, deep, light,
    /// workout group, health group.
    pub fn convert(&self, tasks: &TaskCollections) -> Vec<TimeBlock> {
        let mut blocks = self.routine_blocks(&tasks.morning_tasks);
        blocks.extend(tasks.deep_tasks.iter().filter_map(|t| self.deep_block(t)));
        blocks.extend(tasks.light_tasks.iter().filter_map(|t| self.light_block(t)));
        blocks.extend(self.workout_block(&tasks.workout_tasks));
        blocks.extend(self.health_block(&tasks.health_tasks));

        debug!(
            input = tasks.total_items(),
            candidates = blocks.len(),
            "converted task collections"
        );
        blocks
    }

    /// Routine steps, each depending on the one before it.
    pub fn routine_blocks(&self, items: &[ChecklistItem]) -> Vec<TimeBlock> {
        let mut blocks: Vec<TimeBlock> = Vec::new();
        for item in items.iter().filter(|i| i.has_title()) {
            let minutes = estimate_routine_minutes(&item.title, self.config.routine_default_minutes);
            let mut block = TimeBlock::new(item.title.trim(), BlockCategory::MorningRoutine, minutes)
                .with_source(&item.id)
                .with_energy(EnergyLevel::Low)
                .with_focus(3)
                .with_flexibility(Flexibility::Fixed)
                .with_priority(Priority::High)
                .with_difficulty(2)
                .with_confidence(90)
                .with_status(status_for(item.completed));
            if let Some(previous) = blocks.last() {
                block = block.with_dependency(&previous.id);
            }
            blocks.push(block);
        }
        blocks
    }

    pub fn deep_block(&self, task: &DeepTask) -> Option<TimeBlock> {
        if !task.has_title() {
            return None;
        }

        let minutes = task
            .estimated_duration
            .filter(|m| *m > 0)
            .unwrap_or(self.config.deep_focus_default_minutes);

        let mut block = TimeBlock::new(task.title.trim(), BlockCategory::DeepFocus, minutes)
            .with_source(&task.id)
            .with_description(task.description.clone().unwrap_or_default())
            .with_energy(EnergyLevel::High)
            .with_focus(9)
            .with_flexibility(Flexibility::Flexible)
            .with_priority(task.priority.unwrap_or(Priority::High))
            .with_difficulty(task.complexity.unwrap_or(7))
            .with_can_split(minutes > SPLITTABLE_AFTER_MINUTES)
            .with_status(status_for(task.completed));
        if let Some(category) = task.category.as_deref().filter(|c| !c.trim().is_empty()) {
            block = block.with_tag(category.trim());
        }
        Some(block)
    }

    pub fn light_block(&self, item: &ChecklistItem) -> Option<TimeBlock> {
        if !item.has_title() {
            return None;
        }

        Some(
            TimeBlock::new(item.title.trim(), BlockCategory::LightFocus, self.config.light_task_minutes)
                .with_source(&item.id)
                .with_energy(EnergyLevel::Low)
                .with_focus(4)
                .with_flexibility(Flexibility::Moveable)
                .with_priority(Priority::Medium)
                .with_difficulty(3)
                .with_status(status_for(item.completed)),
        )
    }

    /// All workout items as one block.
    pub fn workout_block(&self, items: &[ChecklistItem]) -> Option<TimeBlock> {
        let titled: Vec<&ChecklistItem> = items.iter().filter(|i| i.has_title()).collect();
        if titled.is_empty() {
            return None;
        }

        let count = u32::try_from(titled.len()).unwrap_or(u32::MAX);
        let minutes = self
            .config
            .workout_min_minutes
            .max(self.config.workout_minutes_per_item.saturating_mul(count));

        Some(
            Self::grouped("Workout", BlockCategory::Workout, minutes, &titled)
                .with_energy(EnergyLevel::Medium)
                .with_focus(4)
                .with_flexibility(Flexibility::Flexible)
                .with_difficulty(6),
        )
    }

    /// All health items as one block.
    pub fn health_block(&self, items: &[ChecklistItem]) -> Option<TimeBlock> {
        let titled: Vec<&ChecklistItem> = items.iter().filter(|i| i.has_title()).collect();
        if titled.is_empty() {
            return None;
        }

        Some(
            Self::grouped(
                "Health checklist",
                BlockCategory::Health,
                self.config.health_minutes,
                &titled,
            )
            .with_energy(EnergyLevel::Low)
            .with_focus(2)
            .with_flexibility(Flexibility::Moveable)
            .with_difficulty(2),
        )
    }

    fn grouped(
        title: &str,
        category: BlockCategory,
        minutes: u32,
        items: &[&ChecklistItem],
    ) -> TimeBlock {
        let description = items
            .iter()
            .map(|i| i.title.trim())
            .collect::<Vec<_>>()
            .join(", ");
        let all_done = items.iter().all(|i| i.completed);

        items
            .iter()
            .fold(TimeBlock::new(title, category, minutes), |block, item| {
                block.with_source(&item.id)
            })
            .with_description(description)
            .with_priority(Priority::Medium)
            .with_status(status_for(all_done))
    }
}
