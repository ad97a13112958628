//! CLI `doctor` command. Runs database diagnostics and prints a health report.

use anyhow::{Context, Result};

use debrief::config::DebriefConfig;
use debrief::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &DebriefConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("Debrief Health Report");
    println!("=====================");
    println!();
    println!("Model:");
    println!("  Provider:        {}", config.model.provider);
    println!("  Endpoint:        {}", config.model.base_url);
    println!("  Name:            {}", config.model.name);
    println!("  Timeout:         {}s", config.model.request_timeout_secs);
    println!();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `debrief extract <file>` to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("Meetings:          {}", report.meeting_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Restore the database from a backup, or move it aside to start fresh.");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
