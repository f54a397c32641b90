//! Single-prompt generators: concepts, micro-lessons, recommendations,
//! skills forecasts, video quizzes and web search.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::prompts::PromptTemplate;
use coachly_core::quiz::parse_quiz;
use coachly_core::validation::validate_name;
use coachly_db::models::lesson::{CreateLesson, LessonSource};
use coachly_db::repositories::LessonRepo;
use serde::Deserialize;
use serde_json::json;

use super::{best_effort, not_provided, provided, render_prompt, settle};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /concepts
pub async fn concepts(State(state): State<AppState>) -> impl IntoResponse {
    let prompt = render_prompt(PromptTemplate::Concepts, &[]);
    let concepts = settle(state.gateway.complete_prompt(&prompt).await, "concepts");
    Json(json!({ "concepts": concepts }))
}

#[derive(Debug, Deserialize)]
pub struct MicroLessonRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

/// POST /micro-lesson
///
/// The generated lesson is also saved to the caller's lessons.
pub async fn micro_lesson(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MicroLessonRequest>,
) -> AppResult<Response> {
    let Some(topic) = provided(input.topic) else {
        return Ok(not_provided("topic"));
    };
    validate_name("topic", &topic)?;

    let prompt = render_prompt(PromptTemplate::MicroLesson, &[("topic", &topic)]);
    let micro_lesson = settle(state.gateway.complete_prompt(&prompt).await, "micro-lesson");

    let lesson = CreateLesson {
        topic: topic.clone(),
        lesson: micro_lesson.clone(),
    };
    best_effort(
        LessonRepo::create(state.store.as_ref(), &auth.uid, &lesson, LessonSource::Generated).await,
        "generated lesson",
        &auth.uid,
    );

    tracing::info!(user_id = %auth.uid, topic = %topic, "Micro-lesson generated");
    Ok(Json(json!({ "micro_lesson": micro_lesson })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub skill_gap: Option<String>,
}

/// POST /recommendation
pub async fn recommendation(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RecommendationRequest>,
) -> AppResult<Response> {
    let Some(skill_gap) = provided(input.skill_gap) else {
        return Ok(not_provided("skill_gap"));
    };
    validate_name("skill_gap", &skill_gap)?;

    let prompt = render_prompt(PromptTemplate::Recommendation, &[("skill_gap", &skill_gap)]);
    let recommendation = settle(state.gateway.complete_prompt(&prompt).await, "recommendation");
    Ok(Json(json!({ "recommendation": recommendation })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SkillsForecastRequest {
    #[serde(default)]
    pub learning_history: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// POST /skills-forecast
pub async fn skills_forecast(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SkillsForecastRequest>,
) -> impl IntoResponse {
    let learning_history = input.learning_history.join(", ");
    let keywords = input.keywords.join(", ");
    let prompt = render_prompt(
        PromptTemplate::SkillsForecast,
        &[
            ("learning_history", &learning_history),
            ("keywords", &keywords),
        ],
    );
    let forecast = settle(state.gateway.complete_prompt(&prompt).await, "skills-forecast");
    Json(json!({ "forecast": forecast }))
}

#[derive(Debug, Deserialize)]
pub struct VideoQuizRequest {
    #[serde(default)]
    pub summary: Option<String>,
}

/// POST /video-quiz
pub async fn video_quiz(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<VideoQuizRequest>,
) -> Response {
    let Some(summary) = provided(input.summary) else {
        return not_provided("summary");
    };
    let prompt = render_prompt(PromptTemplate::VideoQuiz, &[("summary", &summary)]);
    let quiz = settle(
        state.gateway.complete_prompt(&prompt).await.and_then(|raw| parse_quiz(&raw)),
        "video-quiz",
    );
    Json(json!({ "quiz": quiz })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct WebSearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// POST /web-search
///
/// The query goes to the model as-is.
pub async fn web_search(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WebSearchRequest>,
) -> Response {
    let Some(query) = provided(input.query) else {
        return not_provided("query");
    };
    let result = settle(state.gateway.complete_prompt(&query).await, "web-search");
    Json(json!({ "result": result })).into_response()
}
