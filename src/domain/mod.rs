//! Domain types: tasks, subtasks, priorities, and ID generation

mod id;
mod priority;
mod task;

pub use id::generate_id;
pub use priority::Priority;
pub use task::{Subtask, Task};

/// Current Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
