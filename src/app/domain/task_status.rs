use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Task workflow status.
///
/// Tasks move forward TODO -> IN_PROGRESS -> SUBMITTED -> APPROVED, with
/// SUBMITTED -> REJECTED -> IN_PROGRESS as the rework loop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Submitted,
    Approved,
    Rejected,
}

/// A status change that the workflow does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move task from {from} to {to}")]
pub struct InvalidTransition {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl TaskStatus {
    /// Whether the workflow has an edge from `self` to `next`.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match (self, next) {
            (Todo, InProgress)
            | (InProgress, Submitted)
            | (Submitted, Approved)
            | (Submitted, Rejected)
            | (Rejected, InProgress) => true,
            (Todo, _) | (InProgress, _) | (Submitted, _) | (Approved, _) | (Rejected, _) => false,
        }
    }

    /// Validate a transition. Returns the new status, or the offending pair.
    pub fn transition_to(self, next: TaskStatus) -> Result<TaskStatus, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition { from: self, to: next })
        }
    }

    /// Counts toward progress.
    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Approved)
    }
}
