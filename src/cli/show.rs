use anyhow::{Context, Result};

use debrief::config::DebriefConfig;
use debrief::meeting::store;

/// Print one saved meeting: its record (if extracted) and the transcript.
pub fn show(config: &DebriefConfig, id: i64) -> Result<()> {
    let conn = debrief::db::open_database(config.resolved_db_path())?;
    let meeting = store::get_meeting(&conn, id)?.with_context(|| format!("no meeting with id {id}"))?;

    println!("Meeting {} ({})", meeting.id, meeting.created_at.as_deref().unwrap_or("unknown date"));
    println!("{}", "=".repeat(40));
    match &meeting.record {
        Some(record) => super::print_record(record),
        None => println!("Title: {}\n(no extracted record)", meeting.title),
    }
    println!();
    println!("Transcript:");
    println!("{}", meeting.transcript);
    Ok(())
}
