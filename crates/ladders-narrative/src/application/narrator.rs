//! The seam between the narration worker and whatever writes commentary.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::prompt::CommentaryPrompt;

/// Why no commentary came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrationError {
    /// The operator did not supply a credential for the completion service.
    #[error("narrator credential is not configured (set NARRATOR_API_KEY)")]
    MissingCredential,

    /// The request could not be sent or the response could not be read.
    #[error("narrator request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("narrator service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The service answered without any text.
    #[error("narrator returned no commentary")]
    EmptyResponse,
}

/// Produces one line of commentary for a prompt.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Generates commentary.
    ///
    /// # Errors
    ///
    /// Returns a [`NarrationError`] when no commentary could be produced. The
    /// caller reports it in the transcript; it never affects the game.
    async fn narrate(&self, prompt: &CommentaryPrompt) -> Result<String, NarrationError>;
}
