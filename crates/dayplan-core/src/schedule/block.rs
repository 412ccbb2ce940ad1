//! Time block model: the unit every scheduling stage moves around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::completion::CompletionStatus;
use crate::timeline::{TimeOfDay, TimeSlot};

/// Closed set of block categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BlockCategory {
    MorningRoutine,
    DeepFocus,
    LightFocus,
    Workout,
    Health,
    Break,
    Meal,
}

impl BlockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::MorningRoutine => "morning-routine",
            BlockCategory::DeepFocus => "deep-focus",
            BlockCategory::LightFocus => "light-focus",
            BlockCategory::Workout => "workout",
            BlockCategory::Health => "health",
            BlockCategory::Break => "break",
            BlockCategory::Meal => "meal",
        }
    }

    /// Display color used by calendar consumers.
    pub fn color(&self) -> &'static str {
        match self {
            BlockCategory::MorningRoutine => "#f59e0b",
            BlockCategory::DeepFocus => "#6366f1",
            BlockCategory::LightFocus => "#3b82f6",
            BlockCategory::Workout => "#ef4444",
            BlockCategory::Health => "#10b981",
            BlockCategory::Break => "#9ca3af",
            BlockCategory::Meal => "#f97316",
        }
    }

    /// Counted as work time by analytics.
    pub fn is_work(&self) -> bool {
        matches!(self, BlockCategory::DeepFocus | BlockCategory::LightFocus)
    }
}

/// How freely a block may be positioned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Flexibility {
    /// Immovable once placed
    Fixed,
    /// Placed preferentially in peak windows
    Flexible,
    /// Placed in any remaining gap
    Moveable,
}

/// Block priority. Ordering is ascending, so `Critical` is the maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Energy a block demands. Ordering is ascending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// A scheduled (or not yet positioned) unit of work, rest, or routine.
///
/// Position fields are only changed through [`TimeBlock::assign`] and
/// [`TimeBlock::truncate_to`], which keep `duration` equal to
/// `end_time - start_time` while positioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlock {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    /// Minutes
    pub duration: u32,
    pub category: BlockCategory,
    /// Originating task ids, in order, without duplicates
    pub source_task_ids: Vec<String>,
    pub completion_status: CompletionStatus,
    #[serde(default)]
    pub actual_end_time: Option<TimeOfDay>,
    pub energy_requirement: EnergyLevel,
    /// 1-10
    pub focus_requirement: u8,
    pub flexibility: Flexibility,
    /// Block ids that must precede this one
    pub dependencies: Vec<String>,
    pub can_split: bool,
    pub priority: Priority,
    pub color: String,
    pub tags: Vec<String>,
    /// Placement confidence, 0-100
    pub confidence: u8,
    /// 1-10
    pub estimated_difficulty: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeBlock {
    /// Create an unpositioned block with neutral requirements.
    pub fn new(title: impl Into<String>, category: BlockCategory, duration: u32) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            start_time: None,
            end_time: None,
            duration,
            category,
            source_task_ids: Vec::new(),
            completion_status: CompletionStatus::Pending,
            actual_end_time: None,
            energy_requirement: EnergyLevel::Medium,
            focus_requirement: 5,
            flexibility: Flexibility::Moveable,
            dependencies: Vec::new(),
            can_split: false,
            priority: Priority::Medium,
            color: category.color().to_string(),
            tags: vec![category.as_str().to_string()],
            confidence: 50,
            estimated_difficulty: 5,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy_requirement = energy;
        self
    }

    /// Focus requirement, clamped to 1-10.
    pub fn with_focus(mut self, focus: u8) -> Self {
        self.focus_requirement = focus.clamp(1, 10);
        self
    }

    pub fn with_flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = flexibility;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Difficulty, clamped to 1-10.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.estimated_difficulty = difficulty.clamp(1, 10);
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(100);
        self
    }

    pub fn with_status(mut self, status: CompletionStatus) -> Self {
        self.completion_status = status;
        self
    }

    pub fn with_can_split(mut self, can_split: bool) -> Self {
        self.can_split = can_split;
        self
    }

    /// Record an originating task id, ignoring duplicates.
    pub fn with_source(mut self, task_id: impl Into<String>) -> Self {
        let task_id = task_id.into();
        if !self.source_task_ids.contains(&task_id) {
            self.source_task_ids.push(task_id);
        }
        self
    }

    pub fn with_dependency(mut self, block_id: impl Into<String>) -> Self {
        let block_id = block_id.into();
        if !self.dependencies.contains(&block_id) {
            self.dependencies.push(block_id);
        }
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn is_positioned(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    /// Current position, if any.
    pub fn slot(&self) -> Option<TimeSlot> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeSlot { start, end }),
            _ => None,
        }
    }

    /// The interval this block would occupy if it started at `start`.
    pub fn slot_starting_at(&self, start: TimeOfDay) -> Option<TimeSlot> {
        TimeSlot::starting_at(start, self.duration)
    }

    /// Position the block at `slot`.
    pub fn assign(&mut self, slot: TimeSlot) {
        self.start_time = Some(slot.start);
        self.end_time = Some(slot.end);
        self.duration = slot.duration_minutes();
        self.updated_at = Utc::now();
    }

    /// Move the end earlier to `end`. A cut at or before the start leaves a
    /// zero-length block.
    pub fn truncate_to(&mut self, end: TimeOfDay) {
        if let Some(start) = self.start_time {
            let end = end.max(start);
            self.end_time = Some(end);
            self.duration = start.minutes_until(end);
            self.updated_at = Utc::now();
        }
    }

    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        match (self.slot(), other.slot()) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => false,
        }
    }

    /// Demanding enough to earn a recovery break afterwards.
    pub fn is_intensive(&self, focus_threshold: u8) -> bool {
        self.focus_requirement >= focus_threshold || self.energy_requirement == EnergyLevel::High
    }

    /// Apply a completion update. Any status may follow any other; positions
    /// are never touched.
    pub fn set_completion(&mut self, status: CompletionStatus, actual_end_time: Option<TimeOfDay>) {
        self.completion_status = status;
        match status {
            CompletionStatus::Pending => self.actual_end_time = None,
            _ => {
                if actual_end_time.is_some() {
                    self.actual_end_time = actual_end_time;
                }
            }
        }
        self.updated_at = Utc::now();
    }
}
