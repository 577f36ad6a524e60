//! Narrator backed by an OpenAI-compatible chat-completions service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::narrator::{NarrationError, Narrator};
use crate::domain::prompt::CommentaryPrompt;

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default completion length.
pub const DEFAULT_MAX_TOKENS: u32 = 80;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratorConfig {
    /// Operator-supplied credential. `None` disables the service.
    pub api_key: Option<String>,
    /// Service root; `/chat/completions` is appended.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Upper bound on the reply length.
    pub max_tokens: u32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Calls the completion service once per prompt.
#[derive(Debug, Clone)]
pub struct CompletionNarrator {
    config: NarratorConfig,
    client: reqwest::Client,
}

impl CompletionNarrator {
    /// Creates a narrator.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Request` if the HTTP client cannot be built.
    pub fn new(config: NarratorConfig) -> Result<Self, NarrationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NarrationError::Request(e.to_string()))?;
        info!(
            model = %config.model,
            credential = config.api_key.is_some(),
            "narrator configured"
        );
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Narrator for CompletionNarrator {
    #[instrument(skip(self, prompt), fields(tone = ?prompt.tone, model = %self.config.model))]
    async fn narrate(&self, prompt: &CommentaryPrompt) -> Result<String, NarrationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(NarrationError::MissingCredential)?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        debug!("sending completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "completion request failed");
                NarrationError::Request(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NarrationError::Request(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, "completion service error");
            return Err(NarrationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| NarrationError::Request(format!("malformed response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(NarrationError::EmptyResponse)?;

        debug!(content_length = content.len(), "commentary generated");
        Ok(content)
    }
}
