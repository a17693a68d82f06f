//! Gemini API client implementation
//!
//! Implements the DecomposeClient trait against the Gemini generateContent
//! endpoint. One request per call, no retries: a failed call is surfaced
//! once by the store and otherwise swallowed, so hidden retry semantics
//! would only blur that contract.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{AiError, DecomposeClient};
use crate::config::AiConfig;

/// Fallback titles returned when no API key is configured
const MISSING_KEY_FALLBACK: [&str; 2] = ["Breakdown unavailable (Missing API Key)", "Check configuration"];

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// A missing API key is not an error: the client is constructed and
    /// answers every decompose call with fixed fallback content.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        debug!(model = %config.model, "from_config: called");
        let api_key = config.get_api_key();
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "from_config: no API key configured, using fallback content");
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(AiError::Network)?;

        Ok(Self::new(config.model.clone(), api_key, config.base_url.clone(), http))
    }

    /// Create a client with explicit parts (for testing)
    pub fn new(model: String, api_key: Option<String>, base_url: String, http: Client) -> Self {
        Self {
            model,
            api_key,
            base_url,
            http,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for a breakdown call
    ///
    /// Asks for a JSON array of strings so the response parses directly
    /// into subtask titles.
    fn build_breakdown_body(&self, title: &str) -> serde_json::Value {
        debug!(%title, "build_breakdown_body: called");
        serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Break down the task \"{}\" into 3 to 5 clear, actionable subtasks.",
                        title
                    )
                }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            }
        })
    }

    /// Build the request body for a title-refinement call
    fn build_refine_body(&self, raw: &str) -> serde_json::Value {
        debug!("build_refine_body: called");
        serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": format!(
                        "Rewrite this task to be more concise and actionable: \"{}\". Return only the text.",
                        raw
                    )
                }]
            }]
        })
    }

    /// Issue one generateContent request and return the response text, if any
    async fn generate(&self, api_key: &str, body: serde_json::Value) -> Result<Option<String>, AiError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "generate: API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await?;
        Ok(extract_text(api_response))
    }
}

#[async_trait]
impl DecomposeClient for GeminiClient {
    async fn decompose(&self, title: &str) -> Result<Vec<String>, AiError> {
        debug!(%title, "decompose: called");
        let Some(api_key) = &self.api_key else {
            debug!("decompose: no API key, returning fallback");
            return Ok(MISSING_KEY_FALLBACK.iter().map(|s| s.to_string()).collect());
        };

        let body = self.build_breakdown_body(title);
        let text = self.generate(api_key, body).await?;

        match text {
            // No body is a legitimate zero-subtask outcome, not a failure
            None => {
                debug!("decompose: empty response body");
                Ok(Vec::new())
            }
            Some(text) => {
                let titles: Vec<String> = serde_json::from_str(&text)?;
                debug!(count = titles.len(), "decompose: parsed subtask titles");
                Ok(titles)
            }
        }
    }

    async fn refine(&self, raw: &str) -> String {
        debug!("refine: called");
        let Some(api_key) = &self.api_key else {
            return raw.to_string();
        };

        let body = self.build_refine_body(raw);
        match self.generate(api_key, body).await {
            Ok(Some(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => raw.to_string(),
            Err(e) => {
                debug!(error = %e, "refine: call failed, keeping original title");
                raw.to_string()
            }
        }
    }
}

/// Pull the first candidate's text out of a generateContent response
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .find_map(|p| p.text)
        .filter(|t| !t.is_empty())
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
