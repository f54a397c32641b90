//! Handlers for teams, their members and AI team analytics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coachly_core::normalize::{normalize_json, team_analytics_fallback};
use coachly_core::prompts::PromptTemplate;
use coachly_core::validation::{validate_content, validate_email, validate_name};
use coachly_db::models::team::{CreateTeam, CreateTeamMember, Team, TeamMember};
use coachly_db::repositories::TeamRepo;
use serde::Deserialize;
use serde_json::json;

use super::{best_effort, render_prompt, settle};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn validate_member(member: &CreateTeamMember) -> AppResult<()> {
    validate_name("name", &member.name)?;
    if let Some(email) = member.email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    if let Some(role) = member.role.as_deref().filter(|r| !r.is_empty()) {
        validate_name("role", role)?;
    }
    Ok(())
}

async fn owned_team(state: &AppState, auth: &AuthUser, id: &str) -> AppResult<Team> {
    TeamRepo::find(state.store.as_ref(), &auth.uid, id)
        .await?
        .ok_or_else(|| AppError::not_found("Team", id))
}

/// One line per member for the analytics prompt.
fn describe_members(members: &[TeamMember]) -> String {
    members
        .iter()
        .map(|m| {
            format!(
                "- {} ({}): {}",
                m.name,
                m.role.as_deref().unwrap_or("no role"),
                if m.skills.is_empty() {
                    "no listed skills".to_string()
                } else {
                    m.skills.join(", ")
                }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// GET /teams
pub async fn list_teams(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let teams = TeamRepo::list_for_user(state.store.as_ref(), &auth.uid).await?;
    Ok(Json(json!({ "teams": teams })))
}

/// POST /teams
pub async fn create_team(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTeam>,
) -> AppResult<impl IntoResponse> {
    validate_name("name", &input.name)?;
    validate_content("description", &input.description)?;
    for member in &input.members {
        validate_member(member)?;
    }

    let team = TeamRepo::create(state.store.as_ref(), &auth.uid, &input).await?;

    tracing::info!(
        team_id = %team.id,
        user_id = %auth.uid,
        members = input.members.len(),
        "Team created",
    );
    Ok((StatusCode::CREATED, Json(json!({ "team_id": team.id }))))
}

/// GET /teams/{id}
pub async fn get_team(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let team = owned_team(&state, &auth, &id).await?;
    let members = TeamRepo::list_members(state.store.as_ref(), &team.id).await?;
    Ok(Json(json!({ "team": team, "members": members })))
}

/// DELETE /teams/{id}
pub async fn delete_team(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !TeamRepo::delete(state.store.as_ref(), &auth.uid, &id).await? {
        return Err(AppError::not_found("Team", id));
    }
    tracing::info!(team_id = %id, user_id = %auth.uid, "Team deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// GET /teams/{id}/members
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let team = owned_team(&state, &auth, &id).await?;
    let members = TeamRepo::list_members(state.store.as_ref(), &team.id).await?;
    Ok(Json(json!({ "members": members })))
}

/// POST /teams/{id}/members
pub async fn add_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    validate_member(&input)?;
    let team = owned_team(&state, &auth, &id).await?;
    let member = TeamRepo::add_member(state.store.as_ref(), &team.id, &input).await?;

    tracing::info!(team_id = %team.id, member_id = %member.id, "Team member added");
    Ok((StatusCode::CREATED, Json(json!({ "member_id": member.id }))))
}

/// DELETE /teams/{id}/members/{member_id}
pub async fn remove_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, member_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let team = owned_team(&state, &auth, &id).await?;
    if !TeamRepo::remove_member(state.store.as_ref(), &team.id, &member_id).await? {
        return Err(AppError::not_found("TeamMember", member_id));
    }
    tracing::info!(team_id = %team.id, member_id = %member_id, "Team member removed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TeamAnalyticsRequest {
    #[serde(default)]
    pub metrics: Vec<String>,
}

/// Metrics assessed when the request names none.
const DEFAULT_METRICS: &[&str] = &["collaboration", "skill coverage", "communication"];

/// POST /teams/{id}/analytics
pub async fn team_analytics(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TeamAnalyticsRequest>,
) -> AppResult<impl IntoResponse> {
    let team = owned_team(&state, &auth, &id).await?;
    let members = TeamRepo::list_members(state.store.as_ref(), &team.id).await?;

    let metrics: Vec<String> = if input.metrics.is_empty() {
        DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
    } else {
        input.metrics
    };
    let members_text = describe_members(&members);
    let metrics_text = metrics.join(", ");
    let prompt = render_prompt(
        PromptTemplate::TeamAnalytics,
        &[
            ("team_name", &team.name),
            ("team_description", &team.description),
            ("members", &members_text),
            ("metrics", &metrics_text),
        ],
    );

    let analytics = settle(
        state
            .gateway
            .complete_prompt(&prompt)
            .await
            .and_then(|raw| normalize_json(&raw, team_analytics_fallback())),
        "team-analytics",
    );

    let member_count = members.len() as u64;
    best_effort(
        TeamRepo::save_analytics(
            state.store.as_ref(),
            &auth.uid,
            &team.id,
            member_count,
            &metrics,
            &analytics,
        )
        .await,
        "team analytics",
        &auth.uid,
    );

    Ok(Json(json!({
        "team_id": team.id,
        "member_count": member_count,
        "analytics": analytics,
    })))
}
