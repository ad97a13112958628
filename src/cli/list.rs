use anyhow::Result;

use debrief::config::DebriefConfig;
use debrief::meeting::store;

/// Print saved meetings, oldest first.
pub fn list(config: &DebriefConfig) -> Result<()> {
    let conn = debrief::db::open_database(config.resolved_db_path())?;
    let meetings = store::list_meetings(&conn)?;

    if meetings.is_empty() {
        println!("No meetings saved yet.");
        return Ok(());
    }

    println!("{:>5}  {:<25}  Title", "ID", "Created");
    for meeting in &meetings {
        println!(
            "{:>5}  {:<25}  {}",
            meeting.id,
            meeting.created_at.as_deref().unwrap_or("-"),
            meeting.title
        );
    }
    Ok(())
}
