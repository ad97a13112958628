//! Grounded question answering over a stored transcript.
//!
//! Each turn re-sends the full transcript plus the current
//! [`ConversationWindow`]. [`QuestionAnswerer::ask`] records the turn in the
//! window only after the answer validated.

use std::sync::Arc;

use thiserror::Error;

use crate::config::QaConfig;
use crate::llm::{GenerateRequest, LanguageModel, LlmError};

use super::attempt::{generate_validated, AttemptError, Exhausted};
use super::prompts::{output_schema, qa_system_prompt};
use super::types::{AnswerRecord, ConversationTurn};
use super::validate::{parse_answer_record, ValidationError};
use super::window::ConversationWindow;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("answer failed validation after {attempts} attempt(s): {source}")]
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

impl From<Exhausted> for QaError {
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

pub struct QuestionAnswerer {
    model: Arc<dyn LanguageModel>,
    max_attempts: u32,
    strict: bool,
    schema_format: bool,
}

impl QuestionAnswerer {
    pub fn new(model: Arc<dyn LanguageModel>, config: &QaConfig) -> Self {
        Self {
            model,
            max_attempts: config.max_attempts.max(1),
            strict: config.strict,
            schema_format: config.schema_format,
        }
    }

    pub fn request(
        &self,
        question: &str,
        transcript: &str,
        window: &ConversationWindow,
    ) -> GenerateRequest {
        let request = GenerateRequest::new(question.trim())
            .with_system(qa_system_prompt(window, transcript));
        if self.schema_format {
            request.with_format(output_schema::<AnswerRecord>())
        } else {
            request
        }
    }

    /// Answer one question without touching the window.
    pub async fn answer(
        &self,
        question: &str,
        transcript: &str,
        window: &ConversationWindow,
    ) -> Result<AnswerRecord, QaError> {
        if question.trim().is_empty() {
            return Err(QaError::EmptyQuestion);
        }

        tracing::debug!(
            question_len = question.len(),
            history_turns = window.len(),
            "answering question"
        );

        let request = self.request(question, transcript, window);
        let strict = self.strict;
        let record = generate_validated(self.model.as_ref(), &request, self.max_attempts, |raw| {
            parse_answer_record(raw, strict)
        })
        .await?;

        Ok(record)
    }

    /// Answer, then admit the turn into `window`. A failed turn leaves the
    /// window as it was.
    pub async fn ask(
        &self,
        question: &str,
        transcript: &str,
        window: &mut ConversationWindow,
    ) -> Result<AnswerRecord, QaError> {
        let record = self.answer(question, transcript, window).await?;

        let turn = ConversationTurn::new(question.trim(), record.answer.clone());
        if let Some(evicted) = window.push(turn) {
            tracing::debug!(question = %evicted.question, "evicted oldest turn from window");
        }
        Ok(record)
    }
}
