//! Bounded generate-then-validate loop shared by extraction and Q&A.

use crate::llm::{GenerateRequest, LanguageModel, LlmError};

use super::validate::ValidationError;

#[derive(Debug)]
pub enum AttemptError {
    Invalid(ValidationError),
    Model(LlmError),
}

/// The last failure, once no attempts remain or the failure is not retryable.
#[derive(Debug)]
pub struct Exhausted {
    pub attempts: u32,
    pub error: AttemptError,
}

/// Send `request` up to `max_attempts` times (at least once), returning the
/// first response that passes `validate`.
///
/// Validation failures and retryable model errors consume an attempt; any
/// other model error ends the loop immediately.
pub async fn generate_validated<T>(
    model: &dyn LanguageModel,
    request: &GenerateRequest,
    max_attempts: u32,
    validate: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<T, Exhausted> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let error = match model.generate(request).await {
            Ok(raw) => match validate(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        response_len = raw.len(),
                        "model output failed validation"
                    );
                    tracing::debug!(raw = %raw, "rejected model output");
                    AttemptError::Invalid(e)
                }
            },
            Err(e) if e.is_retryable() => {
                tracing::warn!(attempt, max_attempts, error = %e, "model call failed");
                AttemptError::Model(e)
            }
            Err(e) => {
                return Err(Exhausted {
                    attempts: attempt,
                    error: AttemptError::Model(e),
                })
            }
        };

        if attempt >= max_attempts {
            return Err(Exhausted {
                attempts: attempt,
                error,
            });
        }
    }
}
