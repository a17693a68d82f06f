//! Event types for store notifications
//!
//! These events are the presentation layer's view of state transitions:
//! sound cues, confetti, and error notices all hang off them. They carry
//! no state of their own and consumers are free to ignore them.

use serde::{Deserialize, Serialize};

/// Screen coordinate attached to a completion event, for transient
/// visual effects at the click point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

/// Notifications emitted by the task store on state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskEvent {
    /// A task was created and prepended to the collection
    TaskAdded { task_id: String, title: String },

    /// A task transitioned to completed. Carries the optional screen
    /// coordinate of the user intent that caused it.
    TaskCompleted { task_id: String, origin: Option<Origin> },

    /// A task was removed together with its subtasks
    TaskDeleted { task_id: String },

    /// An AI breakdown resolved and appended subtasks
    SubtasksAppended { task_id: String, count: usize },

    /// An AI breakdown failed; task state is unchanged
    BreakdownFailed { task_id: String, message: String },
}

impl TaskEvent {
    /// Event type name for logging and filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "task_added",
            Self::TaskCompleted { .. } => "task_completed",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::SubtasksAppended { .. } => "subtasks_appended",
            Self::BreakdownFailed { .. } => "breakdown_failed",
        }
    }

    /// The task this event concerns
    pub fn task_id(&self) -> &str {
        match self {
            Self::TaskAdded { task_id, .. }
            | Self::TaskCompleted { task_id, .. }
            | Self::TaskDeleted { task_id }
            | Self::SubtasksAppended { task_id, .. }
            | Self::BreakdownFailed { task_id, .. } => task_id,
        }
    }
}
