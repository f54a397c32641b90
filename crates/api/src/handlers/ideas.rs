//! The unknown-intent roadmap: ideas logged by the router that anyone can
//! upvote or follow and admins can triage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::validation::{validate_email, validate_idea_status};
use coachly_db::models::idea::{IdeaListing, SubscribeIdea, UpdateIdeaStatus};
use coachly_db::repositories::IdeaRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{is_admin, RequireAdmin};
use crate::state::AppState;

/// GET /admin/unknown-intents
///
/// Admins see full records. Everyone else sees [`IdeaListing`]s, which
/// carry a subscriber count instead of the subscribers' emails.
pub async fn list_ideas(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let ideas = IdeaRepo::list(state.store.as_ref()).await?;
    if is_admin(&auth, &state.config) {
        return Ok(Json(json!({ "ideas": ideas })).into_response());
    }
    let listings: Vec<IdeaListing> = ideas
        .into_iter()
        .map(|idea| idea.listing(auth.email.as_deref()))
        .collect();
    Ok(Json(json!({ "ideas": listings })).into_response())
}

/// DELETE /admin/unknown-intents/{id}
pub async fn delete_idea(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !IdeaRepo::delete(state.store.as_ref(), &id).await? {
        return Err(AppError::not_found("Idea", id));
    }
    tracing::info!(idea_id = %id, admin_id = %admin.uid, "Idea deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/unknown-intents/{id}/upvote
pub async fn upvote_idea(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let upvotes = IdeaRepo::upvote(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| AppError::not_found("Idea", id.clone()))?;
    Ok(Json(json!({ "id": id, "upvotes": upvotes })))
}

/// POST /admin/unknown-intents/{id}/subscribe
pub async fn subscribe_idea(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SubscribeIdea>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim();
    validate_email(email)?;
    if !IdeaRepo::subscribe(state.store.as_ref(), &id, email).await? {
        return Err(AppError::not_found("Idea", id));
    }
    Ok(Json(json!({ "success": true })))
}

/// POST /admin/unknown-intents/{id}/status
pub async fn set_idea_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateIdeaStatus>,
) -> AppResult<impl IntoResponse> {
    validate_idea_status(&input.status)?;
    if !IdeaRepo::set_status(state.store.as_ref(), &id, &input.status).await? {
        return Err(AppError::not_found("Idea", id));
    }
    tracing::info!(idea_id = %id, admin_id = %admin.uid, status = %input.status, "Idea status changed");
    Ok(Json(json!({ "id": id, "status": input.status })))
}
