//! Interactive question loop.
//!
//! Reads one question per line, prints `Answer: <text>`, and stops on the
//! sentinel `bye` (any case) or end of input. A failed turn, including a line
//! that is not valid UTF-8, prints a diagnostic and the loop carries on.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::qa::QuestionAnswerer;
use super::window::ConversationWindow;

const SENTINEL: &str = "bye";

/// Counts reported when a session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub failed: usize,
}

pub fn is_sentinel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(SENTINEL)
}

pub async fn run_session<R, W>(
    qa: &QuestionAnswerer,
    transcript: &str,
    window: &mut ConversationWindow,
    mut input: R,
    output: &mut W,
) -> std::io::Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut stats = SessionStats::default();

    loop {
        output.write_all(b"Question: ").await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            output.write_all(b"\n").await?;
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(error = %e, "unreadable input line");
                output
                    .write_all(format!("Error: input line is not valid UTF-8: {e}\n\n").as_bytes())
                    .await?;
                continue;
            }
        };
        if is_sentinel(line) {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        match qa.ask(question, transcript, window).await {
            Ok(record) => {
                stats.answered += 1;
                output
                    .write_all(format!("Answer: {}\n\n", record.answer).as_bytes())
                    .await?;
            }
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(error = %e, "question could not be answered");
                output.write_all(format!("Error: {e}\n\n").as_bytes()).await?;
            }
        }
    }

    output.flush().await?;
    tracing::info!(answered = stats.answered, failed = stats.failed, "session ended");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_case_insensitive() {
        assert!(is_sentinel("bye"));
        assert!(is_sentinel("BYE"));
        assert!(is_sentinel("Bye"));
        assert!(is_sentinel("  bye \r"));
    }

    #[test]
    fn sentinel_is_exact() {
        assert!(!is_sentinel("goodbye"));
        assert!(!is_sentinel("bye now"));
        assert!(!is_sentinel(""));
    }
}
