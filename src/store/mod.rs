//! TaskStore - single source of truth for the task collection
//!
//! All mutations go through the store so that persistence and notification
//! stay consistent: every successful mutation snapshots the collection and
//! emits an event the presentation layer can subscribe to. Operations are
//! defensive no-ops on unknown ids; the only reported failure is the AI
//! call's, surfaced once as a `BreakdownFailed` event.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::ai::{AiError, DecomposeClient};
use crate::domain::{Priority, Task};
use crate::events::{EventBus, Origin, TaskEvent};
use crate::persist::SnapshotStore;

/// Aggregate statistics over the current collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority: usize,
}

/// An in-flight breakdown request
///
/// Captures the target's id and title at request time. The id is re-resolved
/// when the response arrives, so a task deleted while the call is pending
/// causes the response to be discarded rather than resurrecting the task.
#[derive(Debug)]
pub struct PendingBreakdown {
    task_id: String,
    title: String,
}

impl PendingBreakdown {
    /// Id of the task awaiting subtasks
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Title captured at request time
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// In-memory task collection with snapshot persistence and event emission
pub struct TaskStore {
    tasks: Vec<Task>,
    archive: Option<SnapshotStore>,
    events: EventBus,
    ai_busy: bool,
}

impl TaskStore {
    /// Create an empty store with no persistence (for tests and embedding)
    pub fn in_memory() -> Self {
        debug!("TaskStore::in_memory: called");
        Self {
            tasks: Vec::new(),
            archive: None,
            events: EventBus::with_default_capacity(),
            ai_busy: false,
        }
    }

    /// Open a store backed by a snapshot slot, loading whatever it holds
    pub fn open(archive: SnapshotStore) -> Self {
        let tasks = archive.load();
        debug!(count = tasks.len(), "TaskStore::open: loaded snapshot");
        Self {
            tasks,
            archive: Some(archive),
            events: EventBus::with_default_capacity(),
            ai_busy: false,
        }
    }

    /// Current collection in authoritative display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Whether an AI breakdown call is in flight
    ///
    /// A single global flag, used by the presentation layer to gate the
    /// breakdown affordance. The store itself imposes no mutual exclusion.
    pub fn ai_busy(&self) -> bool {
        self.ai_busy
    }

    /// Subscribe to state-transition notifications
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.events.subscribe()
    }

    /// Create a task and prepend it to the collection
    ///
    /// Returns None without touching the collection when the trimmed title
    /// is empty. The title is stored as entered.
    pub fn add_task(&mut self, title: &str, priority: Priority) -> Option<&Task> {
        debug!(%title, %priority, "add_task: called");
        if title.trim().is_empty() {
            debug!("add_task: empty title, ignoring");
            return None;
        }

        let task = Task::new(title, priority);
        self.tasks.insert(0, task);
        self.persist();
        self.events.emit(TaskEvent::TaskAdded {
            task_id: self.tasks[0].id.clone(),
            title: self.tasks[0].title.clone(),
        });
        Some(&self.tasks[0])
    }

    /// Remove a task together with its subtasks; false if id is unknown
    pub fn delete_task(&mut self, id: &str) -> bool {
        debug!(%id, "delete_task: called");
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(%id, "delete_task: unknown id, ignoring");
            return false;
        };

        self.tasks.remove(pos);
        self.persist();
        self.events.emit(TaskEvent::TaskDeleted { task_id: id.to_string() });
        true
    }

    /// Flip a task's completion flag; false if id is unknown
    ///
    /// When the new state is completed, emits a celebratory notification
    /// carrying the optional screen coordinate. Subtasks are untouched.
    pub fn toggle_task(&mut self, id: &str, origin: Option<Origin>) -> bool {
        debug!(%id, "toggle_task: called");
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "toggle_task: unknown id, ignoring");
            return false;
        };

        let completed = task.toggle();
        if completed {
            self.events.emit(TaskEvent::TaskCompleted {
                task_id: id.to_string(),
                origin,
            });
        }
        self.persist();
        true
    }

    /// Flip a subtask's completion flag; false if either id is unknown
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        debug!(%task_id, %subtask_id, "toggle_subtask: called");
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            debug!(%task_id, "toggle_subtask: unknown task id, ignoring");
            return false;
        };

        if !task.toggle_subtask(subtask_id) {
            debug!(%subtask_id, "toggle_subtask: unknown subtask id, ignoring");
            return false;
        }
        self.persist();
        true
    }

    /// Replace the collection order with `new_order`
    ///
    /// Accepted only when `new_order` is an exact permutation of the current
    /// ids. A mismatch (drag-reorder race) rejects the whole operation and
    /// keeps the prior order rather than dropping or duplicating tasks.
    pub fn reorder_tasks(&mut self, new_order: &[String]) -> bool {
        debug!(count = new_order.len(), "reorder_tasks: called");
        if new_order.len() != self.tasks.len() {
            warn!(
                given = new_order.len(),
                current = self.tasks.len(),
                "reorder_tasks: id set size mismatch, keeping prior order"
            );
            return false;
        }

        // Validate the permutation before touching the collection
        let mut taken = vec![false; self.tasks.len()];
        let mut order_indices = Vec::with_capacity(new_order.len());
        for id in new_order {
            let Some(pos) = self.tasks.iter().enumerate().position(|(i, t)| !taken[i] && &t.id == id) else {
                warn!(%id, "reorder_tasks: unknown or duplicate id, keeping prior order");
                return false;
            };
            taken[pos] = true;
            order_indices.push(pos);
        }

        let mut slots: Vec<Option<Task>> = std::mem::take(&mut self.tasks).into_iter().map(Some).collect();
        self.tasks = order_indices.into_iter().filter_map(|i| slots[i].take()).collect();
        self.persist();
        true
    }

    /// Aggregate statistics; pure read, unaffected by ordering
    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let high_priority = self.tasks.iter().filter(|t| t.priority == Priority::High).count();
        Stats {
            total,
            completed,
            pending: total - completed,
            high_priority,
        }
    }

    /// Start a breakdown: capture the target's title and raise the busy flag
    ///
    /// Returns None (no flag raised) when the id is unknown.
    pub fn begin_breakdown(&mut self, task_id: &str) -> Option<PendingBreakdown> {
        debug!(%task_id, "begin_breakdown: called");
        let task = self.task(task_id)?;
        let pending = PendingBreakdown {
            task_id: task.id.clone(),
            title: task.title.clone(),
        };
        self.ai_busy = true;
        Some(pending)
    }

    /// Apply a breakdown outcome against the current collection
    ///
    /// Clears the busy flag on every path. The target is re-located by id:
    /// if it was deleted while the call was in flight the response is
    /// discarded. On failure the collection is left exactly as it was and a
    /// `BreakdownFailed` notice is emitted once.
    pub fn apply_breakdown(&mut self, pending: PendingBreakdown, outcome: Result<Vec<String>, AiError>) {
        debug!(task_id = %pending.task_id, "apply_breakdown: called");
        self.ai_busy = false;

        let titles = match outcome {
            Ok(titles) => titles,
            Err(e) => {
                warn!(task_id = %pending.task_id, error = %e, "apply_breakdown: breakdown failed");
                self.events.emit(TaskEvent::BreakdownFailed {
                    task_id: pending.task_id,
                    message: e.to_string(),
                });
                return;
            }
        };

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == pending.task_id) else {
            debug!(task_id = %pending.task_id, "apply_breakdown: target deleted, discarding response");
            return;
        };

        let count = task.append_subtasks(titles);
        self.persist();
        self.events.emit(TaskEvent::SubtasksAppended {
            task_id: pending.task_id,
            count,
        });
    }

    /// Request an AI breakdown for a task; no-op when the id is unknown
    ///
    /// The await on the client is the only suspension point in the store.
    pub async fn request_breakdown(&mut self, task_id: &str, client: &dyn DecomposeClient) {
        let Some(pending) = self.begin_breakdown(task_id) else {
            debug!(%task_id, "request_breakdown: unknown id, ignoring");
            return;
        };
        let outcome = client.decompose(pending.title()).await;
        self.apply_breakdown(pending, outcome);
    }

    /// Rewrite a task's title via the AI service; false when nothing changed
    ///
    /// The client returns the input unchanged on any failure, so a failed
    /// refinement degrades to "no state change" like everything else.
    pub async fn refine_task(&mut self, task_id: &str, client: &dyn DecomposeClient) -> bool {
        debug!(%task_id, "refine_task: called");
        let Some(task) = self.task(task_id) else {
            debug!(%task_id, "refine_task: unknown id, ignoring");
            return false;
        };
        let original = task.title.clone();

        let refined = client.refine(&original).await;
        if refined.trim().is_empty() || refined == original {
            return false;
        }

        // Re-locate: the task may have been deleted during the call
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            debug!(%task_id, "refine_task: target deleted, discarding");
            return false;
        };
        task.title = refined;
        self.persist();
        true
    }

    /// Snapshot the collection after a successful mutation
    ///
    /// A failed save degrades to a warning, never an error: the in-memory
    /// collection stays authoritative for the rest of the session.
    fn persist(&self) {
        if let Some(archive) = &self.archive
            && let Err(e) = archive.save(&self.tasks)
        {
            warn!(error = %e, "persist: snapshot write failed");
        }
    }
}
