//! Model gateway: sends prompts to a hosted OpenAI-compatible chat model.
//!
//! The gateway never fails its caller. Without a credential, or when the
//! provider call fails, it returns a recognizable mock string and reports
//! the substitution as [`Outcome::Degraded`](coachly_core::outcome::Outcome).

pub mod config;
pub mod gateway;
pub mod openai;
pub mod scripted;

pub use config::LlmConfig;
pub use gateway::{CompletionRequest, ModelGateway, PromptInput};
pub use openai::OpenAiGateway;
pub use scripted::ScriptedGateway;
