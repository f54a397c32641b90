//! Intent classification and routing of free-form requests.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::conversation::ChatMessage;
use coachly_core::intent::{modules_prompt_list, parse_classification, route, ClassificationResult};
use coachly_core::outcome::Outcome;
use coachly_core::prompts::PromptTemplate;
use coachly_db::repositories::IdeaRepo;
use coachly_llm::{CompletionRequest, ModelGateway};
use serde::{Deserialize, Serialize};

use super::{best_effort, not_provided, provided, render_prompt, settle};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Ask the model to classify `query` against the known modules.
pub async fn classify(gateway: &dyn ModelGateway, query: &str) -> Outcome<ClassificationResult> {
    let modules = modules_prompt_list();
    let prompt = render_prompt(
        PromptTemplate::IntentClassification,
        &[("modules", &modules), ("query", query)],
    );
    gateway
        .complete_prompt(&prompt)
        .await
        .and_then(|raw| parse_classification(&raw))
}

/// The request a routed prompt becomes for modules that generate text.
///
/// Modules that need their own page (simulation, teams, voice, ...) get
/// `None`; the client navigates there instead.
pub fn dispatch_request(module: &str, prompt: &str) -> Option<CompletionRequest> {
    let request = match module {
        "micro-lesson" => {
            CompletionRequest::prompt(render_prompt(PromptTemplate::MicroLesson, &[("topic", prompt)]))
        }
        "recommendation" => CompletionRequest::prompt(render_prompt(
            PromptTemplate::Recommendation,
            &[("skill_gap", prompt)],
        )),
        "career-coach" => CompletionRequest::messages(vec![
            ChatMessage::system(render_prompt(PromptTemplate::CareerCoach, &[])),
            ChatMessage::user(prompt),
        ]),
        "skills-forecast" => CompletionRequest::prompt(render_prompt(
            PromptTemplate::SkillsForecast,
            &[("learning_history", prompt), ("keywords", "")],
        )),
        "concepts" => CompletionRequest::prompt(render_prompt(PromptTemplate::Concepts, &[])),
        "web-search" => CompletionRequest::prompt(prompt),
        _ => return None,
    };
    Some(request)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// POST /classify-intent
pub async fn classify_intent(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ClassifyRequest>,
) -> Response {
    let Some(query) = provided(input.query) else {
        return not_provided("query");
    };
    let classification = settle(
        classify(state.gateway.as_ref(), &query).await,
        "classify-intent",
    );
    Json(classification).into_response()
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub module: Option<String>,
    pub reason: String,
    pub classification: ClassificationResult,
    /// Generated text when the module produces text directly.
    pub result: Option<String>,
}

/// POST /route
///
/// Classify the prompt, route it, and run it through the routed module's
/// generator when that module produces text. Unrouted prompts are
/// recorded as unknown intents for the roadmap.
pub async fn route_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RouteRequest>,
) -> Response {
    let Some(prompt) = provided(input.prompt) else {
        return not_provided("query");
    };

    let classification = settle(classify(state.gateway.as_ref(), &prompt).await, "route");
    let decision = route(&classification);

    let result = match decision.module.as_deref() {
        Some(module) => match dispatch_request(module, &prompt) {
            Some(request) => Some(settle(state.gateway.complete(request).await, "route")),
            None => None,
        },
        None => {
            best_effort(
                IdeaRepo::log_unknown_intent(
                    state.store.as_ref(),
                    Some(&auth.uid),
                    &prompt,
                    &classification,
                )
                .await,
                "unknown intent",
                &auth.uid,
            );
            None
        }
    };

    tracing::info!(
        user_id = %auth.uid,
        module = ?decision.module,
        confidence = classification.confidence.as_str(),
        "Prompt routed",
    );

    Json(RouteResponse {
        module: decision.module,
        reason: decision.reason,
        classification,
        result,
    })
    .into_response()
}
