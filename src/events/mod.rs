//! Notification channel between the task store and the presentation layer

mod bus;
mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use types::{Origin, TaskEvent};
