//! Extraction of a [`MeetingRecord`] from a transcript.
//!
//! [`Extractor::extract`] sends one flat instruction per attempt and accepts
//! only output that passes [`parse_meeting_record`]. It never touches
//! storage; persisting the record is the caller's job.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ExtractionConfig;
use crate::llm::{GenerateRequest, LanguageModel, LlmError};

use super::attempt::{generate_validated, AttemptError, Exhausted};
use super::prompts::{extraction_prompt, output_schema};
use super::types::MeetingRecord;
use super::validate::{parse_meeting_record, ValidationError};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("model output failed validation after {attempts} attempt(s): {source}")]
    Invalid {
        attempts: u32,
        #[source]
        source: ValidationError,
    },

    #[error("model call failed after {attempts} attempt(s): {source}")]
    Model {
        attempts: u32,
        #[source]
        source: LlmError,
    },
}

impl From<Exhausted> for ExtractionError {
    fn from(e: Exhausted) -> Self {
        match e.error {
            AttemptError::Invalid(source) => Self::Invalid {
                attempts: e.attempts,
                source,
            },
            AttemptError::Model(source) => Self::Model {
                attempts: e.attempts,
                source,
            },
        }
    }
}

pub struct Extractor {
    model: Arc<dyn LanguageModel>,
    max_attempts: u32,
    strict: bool,
    schema_format: bool,
}

impl Extractor {
    pub fn new(model: Arc<dyn LanguageModel>, config: &ExtractionConfig) -> Self {
        Self {
            model,
            max_attempts: config.max_attempts.max(1),
            strict: config.strict,
            schema_format: config.schema_format,
        }
    }

    /// The exact request sent for `transcript` on every attempt.
    pub fn request(&self, transcript: &str) -> GenerateRequest {
        let request = GenerateRequest::new(extraction_prompt(transcript));
        if self.schema_format {
            request.with_format(output_schema::<MeetingRecord>())
        } else {
            request
        }
    }

    pub async fn extract(&self, transcript: &str) -> Result<MeetingRecord, ExtractionError> {
        if transcript.trim().is_empty() {
            return Err(ExtractionError::EmptyTranscript);
        }

        tracing::info!(
            model = %self.model.model_name(),
            transcript_len = transcript.len(),
            max_attempts = self.max_attempts,
            "extracting meeting record"
        );

        let request = self.request(transcript);
        let strict = self.strict;
        let record = generate_validated(self.model.as_ref(), &request, self.max_attempts, |raw| {
            parse_meeting_record(raw, strict)
        })
        .await?;

        tracing::info!(
            title = %record.title,
            decisions = record.decisions.len(),
            action_items = record.action_items.len(),
            "meeting record extracted"
        );
        Ok(record)
    }
}
