//! Prompt construction for extraction and grounded Q&A.
//!
//! The output contract lives in these instructions plus the JSON Schema
//! hint; whether the model honored it is decided separately by
//! [`super::validate`].

use schemars::JsonSchema;
use serde_json::Value;

use super::window::ConversationWindow;

const EXTRACTION_TEMPLATE: &str = r#"You are a meeting assistant. Read the meeting transcript below and extract a title, a concise summary, the decisions made, and the action items with the name of the speaker responsible for each.

Return the result as JSON in exactly this shape:

{
  "title": "Short meeting title",
  "summary": "Concise summary of the meeting.",
  "decisions": [
    {"decision_description": "What was decided"}
  ],
  "action_items": [
    {"speaker": "Name of the responsible speaker", "item": "What they will do"}
  ]
}

Rules:
- Output valid JSON only. No prose, no explanations, no markdown, no code fences.
- Use exactly the keys shown above, in that order. Do not add or rename keys.
- "decisions" and "action_items" are always lists, even when they hold one entry or none. Use [] when there are none.
- "title" must not be empty.

Transcript:
{transcript}
"#;

const NO_HISTORY: &str = "(no previous questions)";

/// Single flat instruction for extracting a meeting record.
pub fn extraction_prompt(transcript: &str) -> String {
    EXTRACTION_TEMPLATE.replace("{transcript}", transcript)
}

/// System framing for one Q&A turn: grounding rule, history, transcript and
/// answer format. The question itself is sent as the user prompt.
pub fn qa_system_prompt(window: &ConversationWindow, transcript: &str) -> String {
    let history = render_history(window);
    format!(
        r#"You are a meeting assistant answering questions about one meeting. Answer using only the information in the transcript below. If the transcript does not contain the answer, say that the meeting did not cover it.

Conversation history:
{history}

Transcript:
{transcript}

Respond with JSON only, in exactly this shape:
{{"answer": "your answer as plain text"}}
The answer must be plain sentences: no JSON, lists, or markdown inside it. No other keys, no text outside the JSON."#
    )
}

/// Serialize the window oldest-first as alternating question/answer lines.
pub fn render_history(window: &ConversationWindow) -> String {
    if window.is_empty() {
        return NO_HISTORY.to_string();
    }
    window
        .iter()
        .map(|turn| format!("Question: {}\nAnswer: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// JSON Schema for `T`, sent to the backend as a structured-output hint.
pub fn output_schema<T: JsonSchema>() -> Value {
    Value::from(schemars::schema_for!(T))
}
