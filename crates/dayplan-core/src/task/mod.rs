//! Task shapes consumed from external task sources.
//!
//! The optimizer does not own these records. It reads them once per run
//! and only keeps their ids in [`crate::schedule::TimeBlock::source_task_ids`].

use serde::{Deserialize, Serialize};

use crate::schedule::Priority;

/// Simple checklist-style item used for routine, light, workout and
/// health collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
        }
    }

    /// Items without a usable title are skipped by the converter.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Deep-focus task with its own estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeepTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Minutes
    #[serde(default, alias = "estimatedDuration")]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<String>,
    /// 1-10
    #[serde(default)]
    pub complexity: Option<u8>,
}

impl DeepTask {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            estimated_duration: None,
            priority: None,
            category: None,
            complexity: None,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// The five collections that feed one optimizer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCollections {
    #[serde(default, alias = "morningTasks")]
    pub morning_tasks: Vec<ChecklistItem>,
    #[serde(default, alias = "deepTasks")]
    pub deep_tasks: Vec<DeepTask>,
    #[serde(default, alias = "lightTasks")]
    pub light_tasks: Vec<ChecklistItem>,
    #[serde(default, alias = "workoutTasks")]
    pub workout_tasks: Vec<ChecklistItem>,
    #[serde(default, alias = "healthTasks")]
    pub health_tasks: Vec<ChecklistItem>,
}

impl TaskCollections {
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Item count across all collections.
    pub fn total_items(&self) -> usize {
        self.morning_tasks.len()
            + self.deep_tasks.len()
            + self.light_tasks.len()
            + self.workout_tasks.len()
            + self.health_tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_deserialize_with_missing_lists() {
        let json = r#"{
            "deep_tasks": [
                {"id": "d1", "title": "Design review", "estimated_duration": 60, "priority": "critical"}
            ],
            "light_tasks": [{"id": "l1", "title": "Inbox"}]
        }"#;
        let tasks: TaskCollections = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.total_items(), 2);
        assert!(tasks.morning_tasks.is_empty());
        assert_eq!(tasks.deep_tasks[0].priority, Some(Priority::Critical));
        assert!(!tasks.light_tasks[0].completed);
    }

    #[test]
    fn camel_case_field_names_are_accepted() {
        let json = r#"{
            "morningTasks": [{"id": "m1", "title": "Shower"}],
            "deepTasks": [{"id": "d1", "title": "Write", "estimatedDuration": 45}]
        }"#;
        let tasks: TaskCollections = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.morning_tasks.len(), 1);
        assert_eq!(tasks.deep_tasks[0].estimated_duration, Some(45));
    }

    #[test]
    fn missing_title_is_detected() {
        let item: ChecklistItem = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(!item.has_title());
        assert!(!ChecklistItem::new("y", "   ").has_title());
        assert!(DeepTask::new("z", "Plan").has_title());
    }
}
