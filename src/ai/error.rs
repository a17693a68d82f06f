//! AI client error types

use thiserror::Error;

/// Errors that can occur during an AI decomposition call
///
/// A missing credential is deliberately not represented here: that is a
/// normal configuration state handled by the client with fallback content.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
