//! Certification recommendations, study plans, interview simulations and
//! the caller's certification profile.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::prompts::PromptTemplate;
use coachly_core::validation::{validate_content, validate_experience_level, validate_name};
use coachly_db::models::certification::ProfileInput;
use coachly_db::repositories::CertificationRepo;
use serde::Deserialize;
use serde_json::json;

use super::{best_effort, not_provided, provided, render_prompt, settle};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn validate_profile(input: &ProfileInput) -> AppResult<()> {
    validate_name("role", &input.role)?;
    validate_content("goals", &input.goals)?;
    validate_experience_level(&input.experience_level)?;
    Ok(())
}

/// POST /certifications/recommend
///
/// Saves the submitted profile and the recommendation alongside it.
pub async fn recommend(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> AppResult<Response> {
    if input.role.trim().is_empty() {
        return Ok(not_provided("role"));
    }
    validate_profile(&input)?;

    let skills = input.skills.join(", ");
    let prompt = render_prompt(
        PromptTemplate::CertificationRecommendation,
        &[
            ("role", &input.role),
            ("skills", &skills),
            ("goals", &input.goals),
            ("experience_level", &input.experience_level),
        ],
    );
    let recommendations = settle(
        state.gateway.complete_prompt(&prompt).await,
        "certifications/recommend",
    );

    let store = state.store.as_ref();
    best_effort(
        CertificationRepo::save_profile(store, &auth.uid, &input).await,
        "certification profile",
        &auth.uid,
    );
    best_effort(
        CertificationRepo::record_recommendation(store, &auth.uid, &input, &recommendations).await,
        "certification recommendation",
        &auth.uid,
    );

    tracing::info!(user_id = %auth.uid, role = %input.role, "Certification recommendations generated");
    Ok(Json(json!({ "recommendations": recommendations })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    #[serde(default)]
    pub certification_name: Option<String>,
    #[serde(default)]
    pub current_skills: Vec<String>,
    #[serde(default)]
    pub study_time: Option<u32>,
    #[serde(default)]
    pub target_date: Option<String>,
}

/// Weekly hours assumed when the request gives none.
const DEFAULT_STUDY_HOURS: u32 = 5;

/// POST /certifications/study-plan
pub async fn study_plan(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<StudyPlanRequest>,
) -> AppResult<Response> {
    let Some(certification_name) = provided(input.certification_name) else {
        return Ok(not_provided("certification_name"));
    };
    validate_name("certification_name", &certification_name)?;

    let current_skills = input.current_skills.join(", ");
    let study_time = input.study_time.unwrap_or(DEFAULT_STUDY_HOURS).to_string();
    let target_date = input
        .target_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "flexible".to_string());
    let prompt = render_prompt(
        PromptTemplate::CertificationStudyPlan,
        &[
            ("certification_name", &certification_name),
            ("current_skills", &current_skills),
            ("study_time", &study_time),
            ("target_date", &target_date),
        ],
    );
    let study_plan = settle(
        state.gateway.complete_prompt(&prompt).await,
        "certifications/study-plan",
    );
    Ok(Json(json!({ "study_plan": study_plan })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub certification_name: Option<String>,
}

/// POST /certifications/simulate
pub async fn simulate(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SimulateRequest>,
) -> AppResult<Response> {
    let Some(certification_name) = provided(input.certification_name) else {
        return Ok(not_provided("certification_name"));
    };
    validate_name("certification_name", &certification_name)?;

    let prompt = render_prompt(
        PromptTemplate::CertificationSimulation,
        &[("certification_name", &certification_name)],
    );
    let simulation = settle(
        state.gateway.complete_prompt(&prompt).await,
        "certifications/simulate",
    );
    Ok(Json(json!({ "simulation": simulation })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CareerAdviceRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// POST /certifications/career-coach
pub async fn career_advice(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CareerAdviceRequest>,
) -> AppResult<Response> {
    let Some(role) = provided(input.role) else {
        return Ok(not_provided("role"));
    };
    validate_name("role", &role)?;

    let skills = input.skills.join(", ");
    let prompt = render_prompt(
        PromptTemplate::CertificationCareerCoach,
        &[("role", &role), ("goals", &input.goals), ("skills", &skills)],
    );
    let advice = settle(
        state.gateway.complete_prompt(&prompt).await,
        "certifications/career-coach",
    );
    Ok(Json(json!({ "advice": advice })).into_response())
}

/// GET /certifications/user-recommendations
pub async fn user_recommendations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let recommendations =
        CertificationRepo::list_recommendations(state.store.as_ref(), &auth.uid).await?;
    Ok(Json(json!({ "recommendations": recommendations })))
}

/// GET /certifications/user-profile
pub async fn user_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = CertificationRepo::find_profile(state.store.as_ref(), &auth.uid).await?;
    Ok(Json(json!({ "profile": profile })))
}

/// POST /certifications/save-profile
pub async fn save_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> AppResult<impl IntoResponse> {
    validate_profile(&input)?;
    let profile = CertificationRepo::save_profile(state.store.as_ref(), &auth.uid, &input).await?;
    tracing::info!(user_id = %auth.uid, "Certification profile saved");
    Ok(Json(json!({ "success": true, "profile": profile })))
}
