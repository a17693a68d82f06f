//! Task and Subtask domain types
//!
//! A Task is the top-level user-created work item. Subtasks are leaf items
//! appended under a Task by the AI breakdown flow. The field names here are
//! the persisted shape: changing them is a breaking change for stored data.

use serde::{Deserialize, Serialize};

use super::id::generate_id;
use super::now_ms;
use super::priority::Priority;

/// A leaf item under a Task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique identifier within the parent task
    pub id: String,

    /// Short actionable title
    pub title: String,

    /// Completion flag, independent of the parent's
    pub completed: bool,
}

impl Subtask {
    /// Create a new incomplete Subtask with a generated ID
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: generate_id("sub", &title),
            title,
            completed: false,
        }
    }
}

/// A top-level work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation
    pub id: String,

    /// Title as entered by the user
    pub title: String,

    /// Completion flag; toggling never touches subtasks
    pub completed: bool,

    /// Urgency tag
    pub priority: Priority,

    /// Creation timestamp (Unix milliseconds), immutable. Display order is
    /// user-controlled and independent of this.
    #[serde(rename = "createdAt")]
    pub created_at: i64,

    /// Ordered subtasks; grows only by explicit append
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create a new Task with a generated ID
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        let title = title.into();
        Self {
            id: generate_id("task", &title),
            title,
            completed: false,
            priority,
            created_at: now_ms(),
            subtasks: Vec::new(),
        }
    }

    /// Create a Task with a specific ID (for testing or recovery)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            priority,
            created_at: now_ms(),
            subtasks: Vec::new(),
        }
    }

    /// Flip the completion flag, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Flip a subtask's completion flag; false if the subtask is unknown
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            Some(subtask) => {
                subtask.completed = !subtask.completed;
                true
            }
            None => false,
        }
    }

    /// Append fresh incomplete subtasks, preserving existing ones and the
    /// order of `titles`
    pub fn append_subtasks(&mut self, titles: impl IntoIterator<Item = String>) -> usize {
        let before = self.subtasks.len();
        self.subtasks.extend(titles.into_iter().map(Subtask::new));
        self.subtasks.len() - before
    }
}
