//! Test narrators — `Narrator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use ladders_narrative::application::narrator::{NarrationError, Narrator};
use ladders_narrative::domain::prompt::CommentaryPrompt;

/// A narrator that records every prompt and answers with the prompt's move
/// description prefixed by `reply_prefix`.
#[derive(Debug)]
pub struct RecordingNarrator {
    reply_prefix: String,
    prompts: Mutex<Vec<CommentaryPrompt>>,
}

impl RecordingNarrator {
    /// Create a narrator that prefixes replies with `reply_prefix`.
    #[must_use]
    pub fn new(reply_prefix: &str) -> Self {
        Self {
            reply_prefix: reply_prefix.to_owned(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns every prompt received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<CommentaryPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Narrator for RecordingNarrator {
    async fn narrate(&self, prompt: &CommentaryPrompt) -> Result<String, NarrationError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(format!("{}{}", self.reply_prefix, prompt.user))
    }
}

/// A narrator that always fails as if no credential were configured.
#[derive(Debug)]
pub struct FailingNarrator;

#[async_trait]
impl Narrator for FailingNarrator {
    async fn narrate(&self, _prompt: &CommentaryPrompt) -> Result<String, NarrationError> {
        Err(NarrationError::MissingCredential)
    }
}

/// A narrator that never answers. Useful for testing that a reset cancels
/// in-flight commentary.
#[derive(Debug)]
pub struct StalledNarrator;

#[async_trait]
impl Narrator for StalledNarrator {
    async fn narrate(&self, _prompt: &CommentaryPrompt) -> Result<String, NarrationError> {
        std::future::pending().await
    }
}
