//! The [`ModelGateway`] seam and the request and mock-text types shared by
//! its implementations.

use async_trait::async_trait;
use coachly_core::conversation::ChatMessage;
use coachly_core::outcome::Outcome;
use futures::stream::BoxStream;
use serde::Deserialize;

/// Returned, verbatim, when a request carries neither a prompt nor messages.
pub const NO_INPUT_SENTINEL: &str = "[NO INPUT] No prompt or messages provided.";

/// Number of characters of the prompt echoed back in a mock response.
pub const MOCK_PREVIEW_CHARS: usize = 60;

/// What to send to the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PromptInput {
    /// A single user prompt.
    Text(String),
    /// A full role-tagged message list.
    Messages(Vec<ChatMessage>),
}

impl PromptInput {
    /// The text a mock response echoes: the prompt, or the content of the
    /// last message.
    pub fn echo_source(&self) -> &str {
        match self {
            PromptInput::Text(text) => text,
            PromptInput::Messages(messages) => messages
                .last()
                .map(|message| message.content.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        match self {
            PromptInput::Text(text) => vec![ChatMessage::user(text)],
            PromptInput::Messages(messages) => messages,
        }
    }
}

/// One completion request. `model` and `max_tokens` fall back to the
/// gateway's configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub input: Option<PromptInput>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            input: Some(PromptInput::Text(text.into())),
            ..Default::default()
        }
    }

    pub fn messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            input: Some(PromptInput::Messages(messages)),
            ..Default::default()
        }
    }
}

/// Access to a hosted chat model.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Complete a request. Never fails: degraded paths return mock text.
    async fn complete(&self, request: CompletionRequest) -> Outcome<String>;

    /// Stream a completion as text chunks.
    ///
    /// Without a credential, or if the provider fails before the first
    /// chunk, the stream yields exactly one mock chunk. A failure mid-stream
    /// ends the stream.
    async fn complete_stream(&self, request: CompletionRequest) -> BoxStream<'static, String>;

    /// Complete a single user prompt with default model settings.
    async fn complete_prompt(&self, prompt: &str) -> Outcome<String> {
        self.complete(CompletionRequest::prompt(prompt)).await
    }
}

fn preview(source: &str) -> String {
    source.chars().take(MOCK_PREVIEW_CHARS).collect()
}

/// Mock text returned when no credential is configured.
pub fn mock_response(source: &str) -> String {
    format!(
        "[MOCKED RESPONSE] This would be the AI's answer to: {}...",
        preview(source)
    )
}

/// Mock text returned when the provider call failed.
pub fn error_mock_response(reason: &str, source: &str) -> String {
    format!(
        "[MOCKED RESPONSE - Error: {reason}] This would be the AI's answer to: {}...",
        preview(source)
    )
}
