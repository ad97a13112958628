//! CLI `run` command: extract, save, then Q&A over the saved transcript.

use std::path::Path;

use anyhow::{Context, Result};

use debrief::config::DebriefConfig;
use debrief::meeting::{pipeline, store, Extractor};

pub async fn run(config: &DebriefConfig, path: &Path) -> Result<()> {
    let transcript = super::read_transcript(path)?;
    let model = super::create_model(config)?;
    let conn = debrief::db::open_database(config.resolved_db_path())?;

    let extractor = Extractor::new(model.clone(), &config.extraction);
    let (record, id) = pipeline::extract_and_save(&extractor, &conn, &transcript).await?;

    super::print_record(&record);
    println!();

    // Q&A is grounded in what was persisted, not the in-memory copy.
    let transcript = store::load_transcript(&conn, id)?
        .with_context(|| format!("meeting {id} vanished after save"))?;
    drop(conn);

    println!("Saved as meeting {id}. Ask questions about it; type `bye` to finish.");
    super::ask::chat(config, model, &transcript).await
}
