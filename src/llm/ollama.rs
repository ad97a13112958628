//! Ollama `/api/generate` client.
//!
//! Sends a single non-streaming request per call and returns the `response`
//! field of the reply. The request timeout comes from
//! [`ModelConfig::request_timeout_secs`](crate::config::ModelConfig).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerateRequest, LanguageModel, LlmError};
use crate::config::ModelConfig;

pub struct OllamaModel {
    client: Client,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a serde_json::Value>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    response: String,
    #[serde(default)]
    done: bool,
}

impl OllamaModel {
    pub fn new(config: &ModelConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        tracing::info!(
            base_url = %config.base_url,
            model = %config.name,
            timeout_secs = config.request_timeout_secs,
            "ollama client ready"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.name.clone(),
            temperature: config.temperature,
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let body = GenerateBody {
            model: &self.model,
            prompt: &request.prompt,
            system: request.system.as_deref(),
            format: request.format.as_ref(),
            stream: false,
            options: self.temperature.map(|temperature| Options { temperature }),
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            has_system = request.system.is_some(),
            "sending generate request"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response.text().await));
        }

        let reply: GenerateReply = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else {
                LlmError::Decode(e.to_string())
            }
        })?;

        if !reply.done {
            tracing::warn!(model = %self.model, "model reply marked incomplete");
        }
        tracing::debug!(response_len = reply.response.len(), "generate request complete");

        Ok(reply.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> LlmError {
    let body = body.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    LlmError::Status { status, body }
}
