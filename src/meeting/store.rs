//! Meeting persistence.
//!
//! Every [`save_meeting`] is a blind insert: titles are not unique. The
//! numeric id is the canonical key; [`find_latest_by_title`] resolves a title
//! to its most recent row.

use anyhow::{ensure, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{MeetingRecord, MeetingSummary, StoredMeeting};

/// Insert a new meeting row and return its id.
pub fn save_meeting(
    conn: &Connection,
    title: &str,
    transcript: &str,
    record: Option<&MeetingRecord>,
) -> Result<i64> {
    ensure!(!title.trim().is_empty(), "meeting title must not be empty");
    ensure!(!transcript.is_empty(), "meeting transcript must not be empty");

    let record_json = record
        .map(serde_json::to_string)
        .transpose()
        .context("failed to serialize meeting record")?;
    let now = chrono::Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO meetings (title, transcript, record, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![title, transcript, record_json, now],
    )
    .context("failed to insert meeting")?;

    let id = conn.last_insert_rowid();
    tracing::info!(id, title, transcript_len = transcript.len(), "meeting saved");
    Ok(id)
}

/// Transcript text for `id`, or `None` if no such meeting exists.
pub fn load_transcript(conn: &Connection, id: i64) -> Result<Option<String>> {
    let transcript = conn
        .query_row(
            "SELECT transcript FROM meetings WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(transcript)
}

pub fn get_meeting(conn: &Connection, id: i64) -> Result<Option<StoredMeeting>> {
    let raw = conn
        .query_row(
            "SELECT id, title, transcript, record, created_at FROM meetings WHERE id = ?1",
            params![id],
            RawMeeting::from_row,
        )
        .optional()?;
    raw.map(RawMeeting::hydrate).transpose()
}

/// Most recently saved meeting with exactly this title.
pub fn find_latest_by_title(conn: &Connection, title: &str) -> Result<Option<StoredMeeting>> {
    let raw = conn
        .query_row(
            "SELECT id, title, transcript, record, created_at FROM meetings \
             WHERE title = ?1 ORDER BY id DESC LIMIT 1",
            params![title],
            RawMeeting::from_row,
        )
        .optional()?;
    raw.map(RawMeeting::hydrate).transpose()
}

/// All meetings, oldest first.
pub fn list_meetings(conn: &Connection) -> Result<Vec<MeetingSummary>> {
    let mut stmt = conn.prepare("SELECT id, title, created_at FROM meetings ORDER BY id")?;
    let meetings = stmt
        .query_map([], |row| {
            Ok(MeetingSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(meetings)
}

struct RawMeeting {
    id: i64,
    title: String,
    transcript: String,
    record: Option<String>,
    created_at: Option<String>,
}

impl RawMeeting {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            transcript: row.get(2)?,
            record: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn hydrate(self) -> Result<StoredMeeting> {
        let record = self
            .record
            .as_deref()
            .map(serde_json::from_str::<MeetingRecord>)
            .transpose()
            .with_context(|| format!("stored record for meeting {} is corrupt", self.id))?;
        Ok(StoredMeeting {
            id: self.id,
            title: self.title,
            transcript: self.transcript,
            record,
            created_at: self.created_at,
        })
    }
}
