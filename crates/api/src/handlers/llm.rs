//! Direct model access: one-shot and streamed.

use std::convert::Infallible;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::conversation::ChatMessage;
use coachly_llm::{CompletionRequest, PromptInput};
use futures::stream::{self, BoxStream, Stream};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;

use super::settle;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LlmRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// A non-empty message list wins over a prompt; blank input is absent.
    pub fn into_completion(self) -> CompletionRequest {
        let input = match (self.messages, self.prompt) {
            (Some(messages), _) if !messages.is_empty() => Some(PromptInput::Messages(messages)),
            (_, Some(prompt)) if !prompt.trim().is_empty() => Some(PromptInput::Text(prompt)),
            _ => None,
        };
        CompletionRequest {
            input,
            model: self.model,
            max_tokens: self.max_tokens,
        }
    }
}

/// POST /llm
pub async fn complete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<LlmRequest>,
) -> impl IntoResponse {
    let response = settle(
        state.gateway.complete(input.into_completion()).await,
        "llm",
    );
    Json(json!({ "response": response }))
}

/// POST /llm-stream
///
/// Chunked `text/plain`. The body ends when the model stream ends or when
/// `stream_timeout_secs` elapses, whichever comes first.
pub async fn complete_stream(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<LlmRequest>,
) -> Response {
    tracing::debug!(user_id = %auth.uid, "Opening model stream");
    let chunks = state.gateway.complete_stream(input.into_completion()).await;
    let chunks = with_deadline(chunks, Duration::from_secs(state.config.stream_timeout_secs))
        .map(Ok::<_, Infallible>);

    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks),
    )
        .into_response()
}

/// End `chunks` once `limit` has passed since the call. Chunks already
/// sent stay sent; the body is closed without a trailer.
fn with_deadline(chunks: BoxStream<'static, String>, limit: Duration) -> impl Stream<Item = String> {
    let deadline = tokio::time::Instant::now() + limit;
    stream::unfold(chunks, move |mut chunks| async move {
        match tokio::time::timeout_at(deadline, chunks.next()).await {
            Ok(Some(chunk)) => Some((chunk, chunks)),
            Ok(None) => None,
            Err(_) => {
                tracing::warn!(limit_secs = limit.as_secs(), "Model stream hit its deadline, closing body");
                None
            }
        }
    })
}
