//! Career coach chat.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use coachly_core::conversation::{to_chat_messages, Turn};
use coachly_core::prompts::PromptTemplate;
use coachly_db::models::session::{CreateSessionLog, SessionKind};
use coachly_db::repositories::SessionRepo;
use coachly_llm::CompletionRequest;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{best_effort, render_prompt, settle};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CareerCoachRequest {
    #[serde(default)]
    pub history: Vec<Turn>,
}

/// POST /career-coach
///
/// The coach prompt is sent as the system message, followed by the
/// conversation as role-tagged messages.
pub async fn career_coach(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CareerCoachRequest>,
) -> impl IntoResponse {
    let system = render_prompt(PromptTemplate::CareerCoach, &[]);
    let messages = to_chat_messages(&system, &input.history);
    let reply = settle(
        state
            .gateway
            .complete(CompletionRequest::messages(messages))
            .await,
        "career-coach",
    );

    let log = CreateSessionLog {
        user_id: auth.uid.clone(),
        kind: SessionKind::CareerCoach,
        history: input.history,
        user_input: None,
        response: Value::String(reply.clone()),
    };
    best_effort(
        SessionRepo::log(state.store.as_ref(), &log).await,
        "career coach session",
        &auth.uid,
    );

    Json(json!({ "reply": reply }))
}
