//! Meeting transcript extraction and grounded Q&A against a local language model.
//!
//! `debrief` reads a meeting transcript, asks a locally hosted model (Ollama)
//! for a structured record of it, stores the transcript and record in SQLite,
//! and then answers follow-up questions using only that transcript plus a short
//! window of the previous questions and answers.
//!
//! | Record field | Shape |
//! |--------------|-------|
//! | `title` | non-empty string |
//! | `summary` | string |
//! | `decisions` | list of `{decision_description}` |
//! | `action_items` | list of `{speaker, item}` |
//!
//! # Architecture
//!
//! - **Model**: any [`llm::LanguageModel`]; the shipped backend calls Ollama's
//!   `/api/generate` without streaming
//! - **Validation**: model output is checked against the record shape in
//!   [`meeting::validate`], separate from prompt construction
//! - **Memory**: a fixed-capacity [`meeting::ConversationWindow`] with FIFO eviction
//! - **Storage**: a single SQLite `meetings` table keyed by integer id
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, migrations, and health checks
//! - [`llm`]: Language model trait, error taxonomy, and the Ollama client
//! - [`meeting`]: Extraction, grounded Q&A, conversation window, session loop, and storage

pub mod config;
pub mod db;
pub mod llm;
pub mod meeting;
