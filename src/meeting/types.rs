//! Meeting record type definitions.
//!
//! Defines [`MeetingRecord`] (the structured extraction result), its list
//! entries [`Decision`] and [`ActionItem`], [`AnswerRecord`] (one Q&A reply),
//! [`ConversationTurn`], and the persisted row shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured information extracted from one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MeetingRecord {
    /// Short headline for the meeting. Never empty.
    pub title: String,
    /// Concise prose summary of what was discussed.
    pub summary: String,
    /// Decisions taken, in the order they were made. Always a list.
    pub decisions: Vec<Decision>,
    /// Follow-up work, each attributed to a speaker. Always a list.
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    pub decision_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionItem {
    /// Name of the person who owns the item, as it appears in the transcript.
    pub speaker: String,
    pub item: String,
}

/// A single grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerRecord {
    /// Plain-text answer. Contains no JSON or markdown structure.
    pub answer: String,
}

/// One question/answer exchange held in conversational memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A row of the `meetings` table.
#[derive(Debug, Clone, Serialize)]
pub struct StoredMeeting {
    pub id: i64,
    pub title: String,
    pub transcript: String,
    /// The extraction result, when the row was written by the pipeline.
    pub record: Option<MeetingRecord>,
    /// RFC 3339 creation timestamp. `None` for rows that predate the column.
    pub created_at: Option<String>,
}

/// Listing projection of a stored meeting.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingSummary {
    pub id: i64,
    pub title: String,
    pub created_at: Option<String>,
}
