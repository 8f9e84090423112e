//! Providers Module
//!
//! Capability seams for everything the backend calls out to: speech
//! synthesis, examiner replies, and email. Production wires real model
//! and mail providers behind these traits; this repo ships deterministic
//! in-process mocks.

mod mock;

use async_trait::async_trait;

use crate::error::Result;

pub use mock::{MockEmailSender, MockExaminer, MockSpeechSynthesizer};

// == Speech Synthesizer ==
/// Text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes audio for the text; None when there is nothing to say.
    async fn synthesize(&self, text: &str) -> Result<Option<Vec<u8>>>;
}

// == Reply Generator ==
/// Conversational examiner capability.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Produces the examiner's next turn for the candidate's utterance.
    async fn generate_reply(&self, user_text: &str) -> Result<String>;
}

// == Email Sender ==
/// Outbound email capability.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends an email and returns the provider message id.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<String>;
}
