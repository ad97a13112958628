#![allow(dead_code)]

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use debrief::db;
use debrief::llm::{GenerateRequest, LanguageModel, LlmError};
use debrief::meeting::ConversationWindow;
use rusqlite::Connection;

pub const SHIP_FRIDAY_TRANSCRIPT: &str =
    "Alice: We decided to ship Friday. Bob will write release notes.";

pub const SHIP_FRIDAY_RECORD: &str = r#"{
    "title": "Friday release",
    "summary": "The team agreed to ship on Friday; Bob owns the release notes.",
    "decisions": [{"decision_description": "Ship the release on Friday"}],
    "action_items": [{"speaker": "Bob", "item": "Write the release notes"}]
}"#;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    conn
}

pub fn window(capacity: usize) -> ConversationWindow {
    ConversationWindow::new(NonZeroUsize::new(capacity).unwrap())
}

/// One canned reaction of [`ScriptedModel`].
pub enum Reply {
    Text(String),
    Timeout,
    Status(u16),
}

pub fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

pub fn answer(s: &str) -> Reply {
    Reply::Text(serde_json::json!({ "answer": s }).to_string())
}

/// A language model that replays queued replies in order and records every
/// request it receives. Running out of replies is a test bug and panics.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A model that must never be called.
    pub fn silent() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted model ran out of replies");
        match reply {
            Reply::Text(s) => Ok(s),
            Reply::Timeout => Err(LlmError::Timeout(1)),
            Reply::Status(status) => Err(LlmError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
