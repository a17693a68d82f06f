//! Snapshot persistence for the task collection
//!
//! One named slot holding the full collection as a JSON array of tasks.
//! Saves overwrite the slot completely; loads swallow a missing or
//! unparsable slot and hand back an empty collection. There is no
//! versioning: a shape change is a breaking change for stored data.

use std::fs;
use std::path::PathBuf;

use eyre::{Context, Result};
use tracing::{debug, warn};

use crate::domain::Task;

/// Persistence adapter for the task collection
pub struct SnapshotStore {
    data_dir: PathBuf,
    slot: String,
}

impl SnapshotStore {
    /// Create a snapshot store writing to `{data_dir}/{slot}.json`
    pub fn new(data_dir: impl Into<PathBuf>, slot: impl Into<String>) -> Self {
        let data_dir = data_dir.into();
        let slot = slot.into();
        debug!(?data_dir, %slot, "SnapshotStore::new: called");
        Self { data_dir, slot }
    }

    /// Path of the slot file
    pub fn slot_file(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.slot))
    }

    /// Load the task collection from the slot
    ///
    /// An absent slot or unparsable content yields an empty collection;
    /// the failure is logged, never surfaced.
    pub fn load(&self) -> Vec<Task> {
        let slot_file = self.slot_file();
        debug!(?slot_file, "SnapshotStore::load: called");

        let content = match fs::read_to_string(&slot_file) {
            Ok(content) => content,
            Err(e) => {
                debug!(error = %e, "SnapshotStore::load: slot absent, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(?slot_file, error = %e, "SnapshotStore::load: unparsable slot, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the slot
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let slot_file = self.slot_file();
        debug!(?slot_file, count = tasks.len(), "SnapshotStore::save: called");

        fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
        let blob = serde_json::to_string(tasks).context("Failed to serialize task collection")?;
        fs::write(&slot_file, blob).context("Failed to write snapshot slot")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use tempfile::tempdir;

    #[test]
    fn test_load_absent_slot_is_empty() {
        let temp = tempdir().unwrap();
        let store = SnapshotStore::new(temp.path(), "tasks");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_garbage_slot_is_empty() {
        let temp = tempdir().unwrap();
        let store = SnapshotStore::new(temp.path(), "tasks");
        fs::write(store.slot_file(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp = tempdir().unwrap();
        let store = SnapshotStore::new(temp.path(), "tasks");

        let mut task = Task::new("Write report", Priority::High);
        task.append_subtasks(vec!["Draft outline".to_string()]);
        let tasks = vec![task, Task::new("Ship release", Priority::Low)];

        store.save(&tasks).unwrap();
        assert_eq!(store.load(), tasks);
    }

    #[test]
    fn test_save_overwrites_slot() {
        let temp = tempdir().unwrap();
        let store = SnapshotStore::new(temp.path(), "tasks");

        store.save(&[Task::new("First", Priority::Medium)]).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }
}
