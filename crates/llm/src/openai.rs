//! [`ModelGateway`] backed by an OpenAI-compatible chat completions API.
//!
//! Requests go through `async_openai`; `OPENAI_BASE_URL` is passed as the
//! client's API base so compatible providers work unchanged. Streaming reads
//! `choices[0].delta.content` from each chunk and skips empty deltas.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionStreamResponse,
    },
    Client,
};
use async_trait::async_trait;
use coachly_core::conversation::{ChatMessage, Role};
use coachly_core::outcome::Outcome;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tracing::debug;

use crate::config::LlmConfig;
use crate::gateway::{
    error_mock_response, mock_response, CompletionRequest, ModelGateway, NO_INPUT_SENTINEL,
};

/// Errors from the provider call. Never returned to callers of the
/// gateway; they are folded into a degraded mock response.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Building the request, the HTTP call, or the provider's reply failed.
    #[error("Provider call failed: {0}")]
    Provider(#[from] OpenAIError),

    /// The response parsed but held no message content.
    #[error("Provider returned no completion")]
    EmptyCompletion,
}

/// Gateway to the configured provider. Without a credential it never
/// touches the network.
pub struct OpenAiGateway {
    client: Option<Client<OpenAIConfig>>,
    config: LlmConfig,
}

impl OpenAiGateway {
    pub fn new(config: LlmConfig) -> Self {
        let client = config.api_key.as_deref().map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(config.base_url.as_str()),
            )
        });
        Self { client, config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn to_request_messages(messages: &[ChatMessage]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(m.content.as_str()),
                ),
                Role::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(m.content.as_str()),
                ),
                Role::Assistant => ChatCompletionRequestMessage::Assistant(m.content.as_str().into()),
            })
            .collect()
    }

    fn build_request(
        &self,
        request: &CompletionRequest,
        messages: &[ChatMessage],
        stream: bool,
    ) -> Result<CreateChatCompletionRequest, GatewayError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(request.model.as_deref().unwrap_or(&self.config.model))
            .messages(Self::to_request_messages(messages))
            .max_completion_tokens(request.max_tokens.unwrap_or(self.config.max_tokens))
            .temperature(self.config.temperature);
        if stream {
            args.stream(true);
        }
        Ok(args.build()?)
    }

    async fn fetch_completion(
        &self,
        client: &Client<OpenAIConfig>,
        request: &CompletionRequest,
        messages: &[ChatMessage],
    ) -> Result<String, GatewayError> {
        let body = self.build_request(request, messages, false)?;
        debug!(model = %body.model, message_count = messages.len(), "Chat completion");

        let response = client.chat().create(body).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(GatewayError::EmptyCompletion)
    }

    async fn open_stream(
        &self,
        client: &Client<OpenAIConfig>,
        request: &CompletionRequest,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, String>, GatewayError> {
        let body = self.build_request(request, messages, true)?;
        debug!(model = %body.model, message_count = messages.len(), stream = true, "Chat completion");

        let mut chunks = client.chat().create_stream(body).await?;
        // Connection and status errors arrive as the first item.
        let first = match chunks.next().await {
            Some(Err(e)) => return Err(e.into()),
            Some(Ok(response)) => Some(response),
            None => None,
        };

        let rest = chunks.take_while(|chunk| {
            let more = match chunk {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Model stream interrupted");
                    false
                }
            };
            futures::future::ready(more)
        });
        let deltas = stream::iter(first.map(Ok))
            .chain(rest)
            .filter_map(|chunk| futures::future::ready(chunk.ok().and_then(delta_text)));
        Ok(deltas.boxed())
    }

    fn single_chunk(text: String) -> BoxStream<'static, String> {
        stream::once(async move { text }).boxed()
    }
}

/// Non-empty `choices[0].delta.content` of a stream chunk.
fn delta_text(response: CreateChatCompletionStreamResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn complete(&self, request: CompletionRequest) -> Outcome<String> {
        let Some(input) = request.input.clone() else {
            return Outcome::degraded("no input provided", NO_INPUT_SENTINEL.to_string());
        };
        let source = input.echo_source().to_string();

        let Some(client) = self.client.as_ref() else {
            tracing::warn!("No model credential configured, returning mock response");
            return Outcome::degraded("no credential configured", mock_response(&source));
        };

        let messages = input.into_messages();
        match self.fetch_completion(client, &request, &messages).await {
            Ok(text) => Outcome::Ok(text),
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(error = %reason, "Model call failed, returning mock response");
                Outcome::degraded(reason.clone(), error_mock_response(&reason, &source))
            }
        }
    }

    async fn complete_stream(&self, request: CompletionRequest) -> BoxStream<'static, String> {
        let Some(input) = request.input.clone() else {
            return Self::single_chunk(NO_INPUT_SENTINEL.to_string());
        };
        let source = input.echo_source().to_string();

        let Some(client) = self.client.as_ref() else {
            tracing::warn!("No model credential configured, streaming mock response");
            return Self::single_chunk(mock_response(&source));
        };

        let messages = input.into_messages();
        match self.open_stream(client, &request, &messages).await {
            Ok(stream) => stream,
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(error = %reason, "Model stream failed to start, streaming mock response");
                Self::single_chunk(error_mock_response(&reason, &source))
            }
        }
    }
}
