//! Schema validation of raw model output.
//!
//! The model has no native structured-output guarantee, so every response is
//! checked here before it becomes a typed record. Validation is
//! all-or-nothing: either a complete record comes back or a
//! [`ValidationError`] naming the first rule that failed. No repair of the
//! raw text is attempted.

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{ActionItem, AnswerRecord, Decision, MeetingRecord};

const RECORD_FIELDS: &[&str] = &["title", "summary", "decisions", "action_items"];
const DECISION_FIELDS: &[&str] = &["decision_description"];
const ACTION_ITEM_FIELDS: &[&str] = &["speaker", "item"];
const ANSWER_FIELDS: &[&str] = &["answer"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("output is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("output must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` must be a list, got {found}")]
    NotAList { field: String, found: &'static str },

    #[error("field `{field}` has the wrong shape: expected {expected}, got {found}")]
    WrongShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unexpected field `{0}`")]
    UnexpectedField(String),

    #[error("field `{0}` must not be empty")]
    EmptyField(String),

    #[error("answer contains structural markup")]
    Markup,
}

/// Parse and validate a [`MeetingRecord`].
///
/// With `strict` set, keys outside the record shape are rejected at every
/// level; otherwise they are ignored.
pub fn parse_meeting_record(raw: &str, strict: bool) -> Result<MeetingRecord, ValidationError> {
    let map = parse_object(raw)?;
    if strict {
        check_keys(&map, RECORD_FIELDS, "")?;
    }

    let title = require_string(&map, "title", "")?;
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyField("title".into()));
    }
    let summary = require_string(&map, "summary", "")?;

    let decisions = require_list(&map, "decisions")?
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<Decision, ValidationError> {
            let path = format!("decisions[{i}]");
            let obj = require_entry(entry, &path)?;
            if strict {
                check_keys(obj, DECISION_FIELDS, &path)?;
            }
            Ok(Decision {
                decision_description: require_string(obj, "decision_description", &path)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let action_items = require_list(&map, "action_items")?
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<ActionItem, ValidationError> {
            let path = format!("action_items[{i}]");
            let obj = require_entry(entry, &path)?;
            if strict {
                check_keys(obj, ACTION_ITEM_FIELDS, &path)?;
            }
            Ok(ActionItem {
                speaker: require_string(obj, "speaker", &path)?,
                item: require_string(obj, "item", &path)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MeetingRecord {
        title,
        summary,
        decisions,
        action_items,
    })
}

/// Parse and validate an [`AnswerRecord`]. The answer is returned trimmed.
pub fn parse_answer_record(raw: &str, strict: bool) -> Result<AnswerRecord, ValidationError> {
    let map = parse_object(raw)?;
    if strict {
        check_keys(&map, ANSWER_FIELDS, "")?;
    }

    let answer = require_string(&map, "answer", "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ValidationError::EmptyField("answer".into()));
    }
    if answer.contains(&['{', '}'][..]) || answer.contains("```") {
        return Err(ValidationError::Markup);
    }

    Ok(AnswerRecord {
        answer: answer.to_string(),
    })
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ValidationError> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(ValidationError::Syntax)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::NotAnObject(kind(&other))),
    }
}

fn check_keys(map: &Map<String, Value>, allowed: &[&str], path: &str) -> Result<(), ValidationError> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(ValidationError::UnexpectedField(join(path, key))),
        None => Ok(()),
    }
}

fn require_string(map: &Map<String, Value>, field: &str, path: &str) -> Result<String, ValidationError> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::WrongShape {
            field: join(path, field),
            expected: "a string",
            found: kind(other),
        }),
        None => Err(ValidationError::MissingField(join(path, field))),
    }
}

fn require_list<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>, ValidationError> {
    match map.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ValidationError::NotAList {
            field: field.to_string(),
            found: kind(other),
        }),
        None => Err(ValidationError::MissingField(field.to_string())),
    }
}

fn require_entry<'a>(entry: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    entry.as_object().ok_or_else(|| ValidationError::WrongShape {
        field: path.to_string(),
        expected: "an object",
        found: kind(entry),
    })
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "title": "Release planning",
        "summary": "The team agreed on a Friday release.",
        "decisions": [{"decision_description": "Ship on Friday"}],
        "action_items": [{"speaker": "Bob", "item": "Write release notes"}]
    }"#;

    #[test]
    fn valid_record_parses() {
        let record = parse_meeting_record(VALID, true).unwrap();
        assert_eq!(record.title, "Release planning");
        assert_eq!(record.decisions.len(), 1);
        assert_eq!(record.action_items[0].speaker, "Bob");
    }

    #[test]
    fn empty_lists_are_sequences() {
        let raw = r#"{"title":"Sync","summary":"Nothing decided.","decisions":[],"action_items":[]}"#;
        let record = parse_meeting_record(raw, true).unwrap();
        assert!(record.decisions.is_empty());
        assert!(record.action_items.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let raw = format!("\n\n  {VALID}  \n");
        assert!(parse_meeting_record(&raw, true).is_ok());
    }

    #[test]
    fn invalid_syntax_fails() {
        let err = parse_meeting_record(r#"{"title": "x", "summary": "#, true).unwrap_err();
        assert!(matches!(err, ValidationError::Syntax(_)));
    }

    #[test]
    fn markdown_fence_is_not_repaired() {
        let raw = format!("```json\n{VALID}\n```");
        let err = parse_meeting_record(&raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::Syntax(_)));
    }

    #[test]
    fn prose_wrapper_fails() {
        let raw = format!("Here is the JSON you asked for:\n{VALID}");
        assert!(parse_meeting_record(&raw, true).is_err());
    }

    #[test]
    fn top_level_array_fails() {
        let err = parse_meeting_record("[]", true).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject("a list")));
    }

    #[test]
    fn missing_field_fails() {
        let raw = r#"{"title":"Sync","decisions":[],"action_items":[]}"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "summary"));
    }

    #[test]
    fn single_object_decisions_fails() {
        let raw = r#"{
            "title": "Sync",
            "summary": "s",
            "decisions": {"decision_description": "Ship on Friday"},
            "action_items": []
        }"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::NotAList { ref field, found: "an object" } if field == "decisions"));
    }

    #[test]
    fn single_object_action_items_fails_even_lenient() {
        let raw = r#"{
            "title": "Sync",
            "summary": "s",
            "decisions": [],
            "action_items": {"speaker": "Bob", "item": "notes"}
        }"#;
        assert!(parse_meeting_record(raw, false).is_err());
    }

    #[test]
    fn entry_missing_subfield_reports_path() {
        let raw = r#"{
            "title": "Sync",
            "summary": "s",
            "decisions": [],
            "action_items": [{"speaker": "Bob", "item": "a"}, {"speaker": "Alice"}]
        }"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert_eq!(err.to_string(), "missing required field `action_items[1].item`");
    }

    #[test]
    fn string_decisions_are_wrong_shape() {
        let raw = r#"{"title":"Sync","summary":"s","decisions":["Ship"],"action_items":[]}"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::WrongShape { found: "a string", .. }));
    }

    #[test]
    fn empty_title_fails() {
        let raw = r#"{"title":"  ","summary":"s","decisions":[],"action_items":[]}"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField(ref f) if f == "title"));
    }

    #[test]
    fn extra_keys_rejected_only_in_strict_mode() {
        let raw = r#"{"title":"Sync","summary":"s","decisions":[],"action_items":[],"attendees":["Alice"]}"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedField(ref f) if f == "attendees"));

        assert!(parse_meeting_record(raw, false).is_ok());
    }

    #[test]
    fn nested_extra_keys_rejected_in_strict_mode() {
        let raw = r#"{"title":"Sync","summary":"s","decisions":[{"decision_description":"d","owner":"Alice"}],"action_items":[]}"#;
        let err = parse_meeting_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedField(ref f) if f == "decisions[0].owner"));
    }

    #[test]
    fn answer_parses_and_trims() {
        let answer = parse_answer_record(r#"{"answer": "  Bob will write the release notes. "}"#, true).unwrap();
        assert_eq!(answer.answer, "Bob will write the release notes.");
    }

    #[test]
    fn answer_must_be_string() {
        let err = parse_answer_record(r#"{"answer": ["Bob"]}"#, true).unwrap_err();
        assert!(matches!(err, ValidationError::WrongShape { expected: "a string", .. }));
    }

    #[test]
    fn answer_missing_fails() {
        let err = parse_answer_record(r#"{"response": "Bob"}"#, false).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "answer"));
    }

    #[test]
    fn empty_answer_fails() {
        let err = parse_answer_record(r#"{"answer": ""}"#, true).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField(_)));
    }

    #[test]
    fn nested_json_answer_is_markup() {
        let raw = r#"{"answer": "{\"speaker\": \"Bob\"}"}"#;
        let err = parse_answer_record(raw, true).unwrap_err();
        assert!(matches!(err, ValidationError::Markup));
    }

    #[test]
    fn plain_text_answer_is_not_json() {
        assert!(parse_answer_record("Bob will write the notes.", true).is_err());
    }
}
