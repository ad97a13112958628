pub mod ask;
pub mod doctor;
pub mod extract;
pub mod list;
pub mod run;
pub mod show;

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use debrief::config::DebriefConfig;
use debrief::llm::{self, LanguageModel};
use debrief::meeting::{ConversationWindow, MeetingRecord};

/// Read the transcript file. Missing, unreadable, or blank input is fatal.
pub fn read_transcript(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    anyhow::ensure!(
        !text.trim().is_empty(),
        "transcript {} is empty",
        path.display()
    );
    tracing::debug!(path = %path.display(), bytes = text.len(), "transcript loaded");
    Ok(text)
}

pub fn create_model(config: &DebriefConfig) -> Result<Arc<dyn LanguageModel>> {
    let model = llm::create_model(&config.model)?;
    Ok(Arc::from(model))
}

pub fn new_window(config: &DebriefConfig) -> Result<ConversationWindow> {
    let capacity =
        NonZeroUsize::new(config.qa.window_size).context("qa.window_size must be at least 1")?;
    Ok(ConversationWindow::new(capacity))
}

pub fn print_record(record: &MeetingRecord) {
    println!("Title: {}", record.title);
    println!();
    println!("Summary:");
    println!("  {}", record.summary);
    println!();

    println!("Decisions:");
    if record.decisions.is_empty() {
        println!("  (none)");
    }
    for (i, decision) in record.decisions.iter().enumerate() {
        println!("  {}. {}", i + 1, decision.decision_description);
    }
    println!();

    println!("Action items:");
    if record.action_items.is_empty() {
        println!("  (none)");
    }
    for (i, action) in record.action_items.iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, action.speaker, action.item);
    }
}
