//! nexus-tasks - AI-enhanced task list core
//!
//! The state-management core of a single-user task list: tasks with
//! priorities and subtasks, user-controlled ordering, aggregate stats,
//! snapshot persistence to a single named slot, and optional AI breakdown
//! of a task title into subtasks.
//!
//! # Core Concepts
//!
//! - **One Owner**: the [`store::TaskStore`] is the sole owner of task
//!   state; all mutations go through it so persistence and notification
//!   stay consistent
//! - **Snapshot After Every Mutation**: the full collection is written to
//!   one JSON slot; a missing or unparsable slot loads as empty
//! - **Notifications, Not Rendering**: state transitions are emitted on a
//!   broadcast channel; the presentation layer subscribes and is free to
//!   render, play, or ignore
//! - **Degrade, Never Die**: unknown ids are silent no-ops, a failed AI
//!   call is surfaced once and swallowed, there are no fatal errors
//!
//! # Modules
//!
//! - [`domain`] - Task, Subtask, Priority, id generation
//! - [`store`] - TaskStore operations and stats
//! - [`persist`] - snapshot slot load/save
//! - [`ai`] - DecomposeClient trait and Gemini implementation
//! - [`events`] - notification channel between store and presentation
//! - [`config`] - configuration types and loading

pub mod ai;
pub mod config;
pub mod domain;
pub mod events;
pub mod logging;
pub mod persist;
pub mod store;

// Re-export commonly used types
pub use ai::{AiError, DecomposeClient, GeminiClient};
pub use config::{AiConfig, Config, StorageConfig};
pub use domain::{Priority, Subtask, Task};
pub use events::{EventBus, Origin, TaskEvent};
pub use persist::SnapshotStore;
pub use store::{PendingBreakdown, Stats, TaskStore};
