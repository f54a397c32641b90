//! A [`ModelGateway`] that replays canned responses, for tests and demos.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coachly_core::outcome::Outcome;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::gateway::{mock_response, CompletionRequest, ModelGateway, NO_INPUT_SENTINEL};

/// Returns queued responses in order, then falls back to the same mock
/// text a gateway without a credential produces. Every request is recorded.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another response.
    pub fn push(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response.into());
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn next(&self, request: CompletionRequest) -> Outcome<String> {
        let source = request
            .input
            .as_ref()
            .map(|input| input.echo_source().to_string());
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let Some(source) = source else {
            return Outcome::degraded("no input provided", NO_INPUT_SENTINEL.to_string());
        };
        let scripted = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        match scripted {
            Some(text) => Outcome::Ok(text),
            None => Outcome::degraded("script exhausted", mock_response(&source)),
        }
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest) -> Outcome<String> {
        self.next(request)
    }

    /// Streams the next response split after each space.
    async fn complete_stream(&self, request: CompletionRequest) -> BoxStream<'static, String> {
        let text = self.next(request).into_value();
        let chunks: Vec<String> = text.split_inclusive(' ').map(str::to_string).collect();
        stream::iter(chunks).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_mocks() {
        let gateway = ScriptedGateway::new(["first", "second"]);
        assert_eq!(gateway.complete_prompt("a").await, Outcome::Ok("first".into()));
        assert_eq!(gateway.complete_prompt("b").await, Outcome::Ok("second".into()));

        let third = gateway.complete_prompt("c").await;
        assert!(third.is_degraded());
        assert!(third.value().starts_with("[MOCKED RESPONSE]"));
        assert_eq!(gateway.requests().len(), 3);
    }

    #[tokio::test]
    async fn stream_chunks_rejoin_to_the_response() {
        let gateway = ScriptedGateway::new(["one two three"]);
        let chunks: Vec<String> = gateway
            .complete_stream(CompletionRequest::prompt("x"))
            .await
            .collect()
            .await;
        assert_eq!(chunks, vec!["one ", "two ", "three"]);
    }
}
