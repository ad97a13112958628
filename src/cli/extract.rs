use std::path::Path;

use anyhow::{Context, Result};

use debrief::config::DebriefConfig;
use debrief::meeting::{pipeline, Extractor};

/// Extract a record from the transcript file and optionally save it.
pub async fn extract(config: &DebriefConfig, path: &Path, save: bool, json: bool) -> Result<()> {
    let transcript = super::read_transcript(path)?;
    let extractor = Extractor::new(super::create_model(config)?, &config.extraction);

    let (record, id) = if save {
        let conn = debrief::db::open_database(config.resolved_db_path())?;
        let (record, id) = pipeline::extract_and_save(&extractor, &conn, &transcript).await?;
        (record, Some(id))
    } else {
        let record = extractor
            .extract(&transcript)
            .await
            .context("meeting extraction failed")?;
        (record, None)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        super::print_record(&record);
    }
    if let Some(id) = id {
        println!();
        println!("Saved as meeting {id}. Ask about it with `debrief ask {id}`.");
    }
    Ok(())
}
