use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DebriefConfig {
    pub general: GeneralConfig,
    pub storage: StorageConfig,
    pub model: ModelConfig,
    pub extraction: ExtractionConfig,
    pub qa: QaConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

/// Language model endpoint settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    /// Backend kind. Only `"ollama"` is supported.
    pub provider: String,
    pub base_url: String,
    /// Model identifier as known to the backend (e.g. `phi3`, `llama3`).
    pub name: String,
    /// Sampling temperature. `None` leaves the backend default in place.
    pub temperature: Option<f32>,
    /// Upper bound on a single generate call, in seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Total attempts per transcript, including the first. Minimum 1.
    pub max_attempts: u32,
    /// Reject unexpected keys in the model output.
    pub strict: bool,
    /// Send the record's JSON Schema as the backend's structured-output format.
    pub schema_format: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QaConfig {
    /// Number of prior turns kept as conversational history (K).
    pub window_size: usize,
    pub max_attempts: u32,
    pub strict: bool,
    pub schema_format: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_debrief_dir()
            .join("meetings.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            base_url: "http://localhost:11434".into(),
            name: "phi3".into(),
            temperature: None,
            request_timeout_secs: 120,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            strict: true,
            schema_format: true,
        }
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            max_attempts: 1,
            strict: true,
            schema_format: true,
        }
    }
}

/// Returns `~/.debrief/`, or `./.debrief/` when no home directory is known.
pub fn default_debrief_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".debrief")
}

/// Returns the default config file path: `~/.debrief/config.toml`
pub fn default_config_path() -> PathBuf {
    default_debrief_dir().join("config.toml")
}

impl DebriefConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            DebriefConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (DEBRIEF_DB, DEBRIEF_MODEL, DEBRIEF_OLLAMA_URL, DEBRIEF_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DEBRIEF_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("DEBRIEF_MODEL") {
            self.model.name = val;
        }
        if let Ok(val) = std::env::var("DEBRIEF_OLLAMA_URL") {
            self.model.base_url = val;
        }
        if let Ok(val) = std::env::var("DEBRIEF_LOG_LEVEL") {
            self.general.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
