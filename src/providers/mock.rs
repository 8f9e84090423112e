//! Mock Providers
//!
//! Deterministic in-process stand-ins for the AI and email capabilities.
//! A failed downstream call surfaces as a Dependency error; these mocks
//! only fail on invalid input.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::providers::{EmailSender, ReplyGenerator, SpeechSynthesizer};

/// Bytes of silence emitted per synthesized word.
const BYTES_PER_WORD: usize = 320;

// == Mock Speech Synthesizer ==
/// Emits a silent 16-bit mono PCM buffer sized by word count.
#[derive(Debug, Default)]
pub struct MockSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Option<Vec<u8>>> {
        let words = text.split_whitespace().count();
        if words == 0 {
            return Ok(None);
        }
        Ok(Some(vec![0u8; words * BYTES_PER_WORD]))
    }
}

// == Mock Examiner ==
/// Produces a templated examiner turn keyed off the candidate's words.
#[derive(Debug, Default)]
pub struct MockExaminer;

#[async_trait]
impl ReplyGenerator for MockExaminer {
    async fn generate_reply(&self, user_text: &str) -> Result<String> {
        let words: Vec<&str> = user_text.split_whitespace().collect();
        if words.is_empty() {
            return Ok("Take your time. Could you tell me a little about yourself?".to_string());
        }

        let snippet = words
            .iter()
            .take(8)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!(
            "That's interesting. You said \"{}\" — could you develop that point a little further?",
            snippet
        ))
    }
}

// == Mock Email Sender ==
/// Logs the outbound mail and returns a generated message id.
#[derive(Debug, Default)]
pub struct MockEmailSender;

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        _html_body: &str,
        text_body: &str,
    ) -> Result<String> {
        if to.is_empty() || !to.contains('@') {
            return Err(AppError::Validation(format!(
                "Invalid recipient address: '{to}'"
            )));
        }

        let message_id = Uuid::new_v4().to_string();
        info!(
            to,
            subject,
            message_id,
            body_len = text_body.len(),
            "mock email sent"
        );
        Ok(message_id)
    }
}
