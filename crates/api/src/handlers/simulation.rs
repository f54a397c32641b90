//! Customer conversation simulation: an opening scenario, then one step
//! per employee response.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use coachly_core::conversation::{flatten_history, Turn};
use coachly_core::normalize::{normalize_json, simulation_fallback};
use coachly_core::outcome::Outcome;
use coachly_core::prompts::PromptTemplate;
use coachly_db::models::session::{CreateSessionLog, SessionKind};
use coachly_db::repositories::SessionRepo;
use coachly_llm::ModelGateway;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{best_effort, render_prompt, settle};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

async fn generate_step(gateway: &dyn ModelGateway, prompt: &str) -> Outcome<Value> {
    gateway
        .complete_prompt(prompt)
        .await
        .and_then(|raw| normalize_json(&raw, simulation_fallback()))
}

/// GET /simulation
pub async fn start_simulation(_auth: AuthUser, State(state): State<AppState>) -> impl IntoResponse {
    let prompt = render_prompt(PromptTemplate::Simulation, &[]);
    let simulation = settle(
        generate_step(state.gateway.as_ref(), &prompt).await,
        "simulation",
    );
    Json(json!({ "simulation": simulation }))
}

#[derive(Debug, Deserialize)]
pub struct SimulationStepRequest {
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub user_input: String,
}

/// POST /simulation-step
///
/// Returns the normalized step object itself, not wrapped.
pub async fn simulation_step(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SimulationStepRequest>,
) -> impl IntoResponse {
    let history = flatten_history(&input.history);
    let prompt = render_prompt(
        PromptTemplate::SimulationStep,
        &[("history", &history), ("user_input", &input.user_input)],
    );
    let step = settle(
        generate_step(state.gateway.as_ref(), &prompt).await,
        "simulation-step",
    );

    let log = CreateSessionLog {
        user_id: auth.uid.clone(),
        kind: SessionKind::Simulation,
        history: input.history,
        user_input: Some(input.user_input),
        response: step.clone(),
    };
    best_effort(
        SessionRepo::log(state.store.as_ref(), &log).await,
        "simulation session",
        &auth.uid,
    );

    Json(step)
}
