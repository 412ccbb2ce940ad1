//! Block completion state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Completion status of a time block.
///
/// The usual flow is below. Updates outside it are still applied; callers
/// use [`CompletionStatus::can_transition_to`] to flag them.
/// - PENDING → IN-PROGRESS | COMPLETED | SKIPPED | CANCELLED
/// - IN-PROGRESS → PENDING | COMPLETED | SKIPPED | CANCELLED
/// - COMPLETED | SKIPPED | CANCELLED → PENDING (reopen)
/// - any status → itself (re-mark)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
    Cancelled,
}

impl CompletionStatus {
    pub const ALL: [CompletionStatus; 5] = [
        CompletionStatus::Pending,
        CompletionStatus::InProgress,
        CompletionStatus::Completed,
        CompletionStatus::Skipped,
        CompletionStatus::Cancelled,
    ];

    /// Whether moving to `to` follows the usual flow.
    pub fn can_transition_to(&self, to: &CompletionStatus) -> bool {
        self == to || self.valid_transitions().contains(to)
    }

    /// Usual next states, excluding the re-mark.
    pub fn valid_transitions(&self) -> &'static [CompletionStatus] {
        use CompletionStatus::*;
        match self {
            Pending => &[InProgress, Completed, Skipped, Cancelled],
            InProgress => &[Pending, Completed, Skipped, Cancelled],
            Completed | Skipped | Cancelled => &[Pending],
        }
    }

    /// Finished states; the usual flow only reopens them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CompletionStatus::Completed | CompletionStatus::Skipped | CompletionStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Pending => "pending",
            CompletionStatus::InProgress => "in-progress",
            CompletionStatus::Completed => "completed",
            CompletionStatus::Skipped => "skipped",
            CompletionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        CompletionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!(
                    "'{s}' is not one of pending, in-progress, completed, skipped, cancelled"
                ),
            })
    }
}
