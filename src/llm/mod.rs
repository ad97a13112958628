//! Language model access.
//!
//! Provides the [`LanguageModel`] trait, the [`LlmError`] taxonomy, and an
//! Ollama-backed implementation. The model is created via [`create_model`]
//! from configuration.

pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

/// A single prompt sent to the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    /// The user-facing instruction or question.
    pub prompt: String,
    /// Optional system framing. Extraction sends none.
    pub system: Option<String>,
    /// Optional JSON Schema the backend should constrain its output to.
    pub format: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_format(mut self, format: serde_json::Value) -> Self {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model call timed out after {0}s")]
    Timeout(u64),

    #[error("could not reach model service: {0}")]
    Transport(String),

    #[error("model service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response from model service: {0}")]
    Decode(String),
}

impl LlmError {
    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

/// A synchronous-in-spirit request/response text generator: one prompt in,
/// one complete response out. No streaming, no tool calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;

    /// Identifier of the model answering requests.
    fn model_name(&self) -> &str;
}

/// Create a language model client from config.
///
/// Currently only `"ollama"` is supported.
pub fn create_model(config: &crate::config::ModelConfig) -> anyhow::Result<Box<dyn LanguageModel>> {
    match config.provider.as_str() {
        "ollama" => {
            let model = ollama::OllamaModel::new(config)?;
            Ok(Box::new(model))
        }
        other => anyhow::bail!("unknown model provider: {other}. Supported: ollama"),
    }
}
