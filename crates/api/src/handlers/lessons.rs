//! Handlers for the caller's saved lessons.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coachly_core::error::CoreError;
use coachly_core::validation::{validate_content, validate_name};
use coachly_db::models::lesson::{CreateLesson, LessonSource, UpdateLesson};
use coachly_db::repositories::LessonRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /lessons
// ---------------------------------------------------------------------------

/// List the caller's lessons, newest first.
pub async fn list_lessons(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let lessons = LessonRepo::list_for_user(state.store.as_ref(), &auth.uid).await?;
    Ok(Json(json!({ "lessons": lessons })))
}

// ---------------------------------------------------------------------------
// POST /lessons
// ---------------------------------------------------------------------------

pub async fn create_lesson(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLesson>,
) -> AppResult<impl IntoResponse> {
    validate_name("topic", &input.topic)?;
    validate_content("lesson", &input.lesson)?;

    let lesson =
        LessonRepo::create(state.store.as_ref(), &auth.uid, &input, LessonSource::Manual).await?;

    tracing::info!(lesson_id = %lesson.id, user_id = %auth.uid, "Lesson created");
    Ok((StatusCode::CREATED, Json(lesson)))
}

// ---------------------------------------------------------------------------
// GET /lessons/{id}
// ---------------------------------------------------------------------------

pub async fn get_lesson(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let lesson = LessonRepo::find(state.store.as_ref(), &auth.uid, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", id))?;
    Ok(Json(lesson))
}

// ---------------------------------------------------------------------------
// PUT /lessons/{id}
// ---------------------------------------------------------------------------

pub async fn update_lesson(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateLesson>,
) -> AppResult<impl IntoResponse> {
    if input.topic.is_none() && input.lesson.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one of topic or lesson must be provided".into(),
        )));
    }
    if let Some(topic) = &input.topic {
        validate_name("topic", topic)?;
    }
    if let Some(lesson) = &input.lesson {
        validate_content("lesson", lesson)?;
    }

    let lesson = LessonRepo::update(state.store.as_ref(), &auth.uid, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Lesson", id))?;

    tracing::info!(lesson_id = %lesson.id, user_id = %auth.uid, "Lesson updated");
    Ok(Json(lesson))
}

// ---------------------------------------------------------------------------
// DELETE /lessons/{id}
// ---------------------------------------------------------------------------

pub async fn delete_lesson(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !LessonRepo::delete(state.store.as_ref(), &auth.uid, &id).await? {
        return Err(AppError::not_found("Lesson", id));
    }
    tracing::info!(lesson_id = %id, user_id = %auth.uid, "Lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}
