//! AI decomposition client
//!
//! One outbound request per breakdown, carrying the task title as a prompt
//! and expecting a JSON array of short strings back. A missing credential is
//! a handled configuration state, not an error.

mod client;
mod error;
mod gemini;

pub use client::DecomposeClient;
pub use error::AiError;
pub use gemini::GeminiClient;
