use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;

use debrief::config::DebriefConfig;
use debrief::llm::LanguageModel;
use debrief::meeting::{run_session, store, QuestionAnswerer};

/// How to pick the stored meeting.
pub enum Target {
    Id(i64),
    /// Most recent meeting with this title.
    Title(String),
}

pub async fn ask(config: &DebriefConfig, target: Target) -> Result<()> {
    let conn = debrief::db::open_database(config.resolved_db_path())?;

    let (id, transcript) = match target {
        Target::Id(id) => {
            let transcript = store::load_transcript(&conn, id)?
                .with_context(|| format!("no meeting with id {id}"))?;
            (id, transcript)
        }
        Target::Title(title) => {
            let meeting = store::find_latest_by_title(&conn, &title)?
                .with_context(|| format!("no meeting titled {title:?}"))?;
            (meeting.id, meeting.transcript)
        }
    };

    println!("Asking about meeting {id}. Type `bye` to finish.");
    chat(config, super::create_model(config)?, &transcript).await
}

/// Run the interactive loop on stdin/stdout for one transcript.
pub async fn chat(
    config: &DebriefConfig,
    model: Arc<dyn LanguageModel>,
    transcript: &str,
) -> Result<()> {
    let qa = QuestionAnswerer::new(model, &config.qa);
    let mut window = super::new_window(config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_session(&qa, transcript, &mut window, stdin, &mut stdout)
        .await
        .context("interactive session failed")?;
    Ok(())
}
