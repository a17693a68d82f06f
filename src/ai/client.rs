//! DecomposeClient trait definition

use async_trait::async_trait;

use super::AiError;

/// Stateless AI decomposition client - each call is independent
///
/// One request per call, no retries, no caching. The transport timeout is
/// the only time bound. The task store is responsible for catching errors
/// from `decompose` and surfacing them once to the user.
#[async_trait]
pub trait DecomposeClient: Send + Sync {
    /// Break a task title into 3-5 short actionable subtask titles
    ///
    /// An empty vec is a legitimate "zero subtasks" outcome, distinct from
    /// failure. A missing credential yields fixed fallback content rather
    /// than an error.
    async fn decompose(&self, title: &str) -> Result<Vec<String>, AiError>;

    /// Rewrite a task title to be more concise and actionable
    ///
    /// Never fails: on a missing credential, a service error, or an empty
    /// response the input is returned unchanged.
    async fn refine(&self, raw: &str) -> String;
}
