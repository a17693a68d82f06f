//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI provider configuration
    pub ai: AiConfig,

    /// Snapshot storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then project-local `.nexus-tasks.yml`, then user
    /// config `~/.config/nexus-tasks/nexus-tasks.yml`, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".nexus-tasks.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("nexus-tasks").join("nexus-tasks.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// AI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds (the only time bound on a call)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl AiConfig {
    /// Read the API key from the configured environment variable
    ///
    /// None is a normal configuration state, not an error: the client
    /// answers with fallback content instead of calling out.
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the snapshot slot; defaults to the platform
    /// data dir under `nexus-tasks`
    #[serde(rename = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Slot name the collection is persisted under
    pub slot: String,
}

impl StorageConfig {
    /// Resolve the effective data directory
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nexus-tasks")
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            slot: "nexus-tasks".to_string(),
        }
    }
}
