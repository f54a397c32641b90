//! Request handlers, one module per feature area.
//!
//! Every generation handler has the same shape: fill a prompt template,
//! call the model gateway, optionally normalize the text as JSON, and
//! optionally record the result for the caller. Recording is best-effort.

pub mod certifications;
pub mod coach;
pub mod generation;
pub mod ideas;
pub mod intent;
pub mod lessons;
pub mod llm;
pub mod simulation;
pub mod teams;
pub mod voice;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::outcome::Outcome;
use coachly_core::prompts::PromptTemplate;
use coachly_db::StoreError;
use serde_json::json;

/// Render a template, logging any placeholder left unfilled.
pub(crate) fn render_prompt(template: PromptTemplate, vars: &[(&str, &str)]) -> String {
    let rendered = template.render(vars);
    if !rendered.unresolved_placeholders.is_empty() {
        tracing::debug!(
            template = template.name(),
            unresolved = ?rendered.unresolved_placeholders,
            "Prompt rendered with unresolved placeholders",
        );
    }
    rendered.text
}

/// Log a substituted value and unwrap it.
pub(crate) fn settle<T>(outcome: Outcome<T>, endpoint: &'static str) -> T {
    if let Some(reason) = outcome.reason() {
        tracing::warn!(endpoint, reason, "Returning substituted response");
    }
    outcome.into_value()
}

/// Log a failed secondary write and carry on. The caller's response does
/// not depend on it.
pub(crate) fn best_effort<T>(result: Result<T, StoreError>, what: &'static str, user_id: &str) {
    if let Err(e) = result {
        tracing::error!(user_id, error = %e, "Failed to record {what}");
    }
}

/// The value, unless absent or blank.
pub(crate) fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body returned with 200 when a prompt endpoint is missing the field it
/// builds its prompt from.
pub(crate) fn not_provided(field: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "error": format!("No {field} provided") })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_not_provided() {
        assert_eq!(provided(None), None);
        assert_eq!(provided(Some("  \n".into())), None);
        assert_eq!(provided(Some(" x ".into())), Some(" x ".into()));
    }
}
