pub mod extract;
pub mod pipeline;
pub mod prompts;
pub mod qa;
pub mod session;
pub mod store;
pub mod types;
pub mod validate;
pub mod window;

mod attempt;

pub use extract::{ExtractionError, Extractor};
pub use qa::{QaError, QuestionAnswerer};
pub use session::{run_session, SessionStats};
pub use types::{ActionItem, AnswerRecord, ConversationTurn, Decision, MeetingRecord};
pub use window::ConversationWindow;
