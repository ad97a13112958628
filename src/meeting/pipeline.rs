//! Extract-then-persist step shared by the `extract` and `run` commands.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::extract::Extractor;
use super::store;
use super::types::MeetingRecord;

/// Extract a record from `transcript` and store both under a new id.
///
/// Nothing is written unless extraction validated; on failure the database
/// is left as it was.
pub async fn extract_and_save(
    extractor: &Extractor,
    conn: &Connection,
    transcript: &str,
) -> Result<(MeetingRecord, i64)> {
    let record = extractor
        .extract(transcript)
        .await
        .context("meeting extraction failed")?;

    let id = store::save_meeting(conn, &record.title, transcript, Some(&record))?;
    Ok((record, id))
}
