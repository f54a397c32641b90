//! Voice cloning: sample upload, simulated training, model listing,
//! synthesis and deletion.
//!
//! Results are reported as `{success, ...}` bodies with status 200, also
//! when the operation could not be performed.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use coachly_core::error::CoreError;
use coachly_db::repositories::VoiceModelRepo;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::voice::samples::{self, SampleError};
use crate::voice::training::{run_training, TrainingJob};

/// Multipart field carrying the audio file.
const AUDIO_FIELD: &str = "audio";

fn failure(error: impl Into<String>) -> Response {
    Json(json!({ "success": false, "error": error.into() })).into_response()
}

/// Map a sample error to either a `{success: false}` body or an HTTP error.
fn sample_failure(err: SampleError) -> AppResult<Response> {
    match err {
        SampleError::Empty | SampleError::NotFound => Ok(failure(err.to_string())),
        SampleError::OutsideUserDir => Err(AppError::Core(CoreError::Forbidden(err.to_string()))),
        SampleError::Io(e) => Err(AppError::InternalError(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// POST /voice-cloning/upload-sample
// ---------------------------------------------------------------------------

pub async fn upload_sample(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{AUDIO_FIELD}' field")))?;

    match samples::save_sample(&state.config.voice, &auth.uid, filename.as_deref(), &data).await {
        Ok(saved) => {
            tracing::info!(
                user_id = %auth.uid,
                filename = %saved.filename,
                bytes = data.len(),
                "Voice sample uploaded",
            );
            Ok(Json(json!({
                "success": true,
                "audio_path": saved.audio_path.to_string_lossy(),
                "filename": saved.filename,
            }))
            .into_response())
        }
        Err(e) => sample_failure(e),
    }
}

// ---------------------------------------------------------------------------
// POST /voice-cloning/train
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TrainRequest {
    #[serde(default)]
    pub audio_path: Option<String>,
}

/// Start a background training run on the requested sample, or on the
/// caller's latest upload when none is named.
pub async fn train(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TrainRequest>,
) -> AppResult<Response> {
    let voice = &state.config.voice;
    let requested = input.audio_path.as_deref().filter(|p| !p.trim().is_empty());
    let audio_path = match samples::resolve_sample(voice, &auth.uid, requested).await {
        Ok(path) => path,
        Err(e) => return sample_failure(e),
    };

    let models_dir = samples::user_models_dir(voice, &auth.uid);
    tokio::fs::create_dir_all(&models_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let training_id = state.training.start(&auth.uid).await;
    let job = TrainingJob {
        training_id: training_id.clone(),
        user_id: auth.uid.clone(),
        audio_path: audio_path.to_string_lossy().to_string(),
        model_path: models_dir
            .join(format!("{training_id}.model"))
            .to_string_lossy()
            .to_string(),
        step: Duration::from_millis(voice.training_step_ms),
    };
    tokio::spawn(run_training(
        job,
        Arc::clone(&state.training),
        Arc::clone(&state.store),
    ));

    tracing::info!(user_id = %auth.uid, training_id = %training_id, "Voice training started");
    Ok(Json(json!({
        "success": true,
        "training_id": training_id,
        "status": "training",
    }))
    .into_response())
}

// ---------------------------------------------------------------------------
// GET /voice-cloning/training-status/{id}
// ---------------------------------------------------------------------------

/// Status of a training run. Runs started by other users read as unknown.
pub async fn training_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(training_id): Path<String>,
) -> Response {
    match state.training.get(&training_id).await {
        Some(status) if status.user_id == auth.uid => Json(status).into_response(),
        _ => Json(json!({ "status": "not_found", "error": "Training ID not found" }))
            .into_response(),
    }
}

// ---------------------------------------------------------------------------
// GET /voice-cloning/models
// ---------------------------------------------------------------------------

pub async fn list_models(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let voice_models = VoiceModelRepo::list_for_user(state.store.as_ref(), &auth.uid).await?;
    Ok(Json(json!({ "success": true, "voice_models": voice_models })))
}

// ---------------------------------------------------------------------------
// POST /voice-cloning/synthesize
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Checks that the caller has a usable model. No speech engine is bundled,
/// so a request that passes every check still reports failure.
pub async fn synthesize(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SynthesizeRequest>,
) -> AppResult<Response> {
    if input.text.trim().is_empty() {
        return Ok(failure("No text provided"));
    }

    let Some(model) = VoiceModelRepo::find_for_user(state.store.as_ref(), &auth.uid).await? else {
        return Ok(failure("No trained voice model found"));
    };

    let sample_present = match model.audio_path.as_deref() {
        Some(path) => samples::sample_exists(path).await,
        None => false,
    };
    if !sample_present {
        return Ok(failure(SampleError::NotFound.to_string()));
    }

    tracing::warn!(
        user_id = %auth.uid,
        voice_model_id = %model.id,
        language = %input.language,
        "Speech synthesis requested but no TTS engine is available",
    );
    Ok(failure("TTS engine not available"))
}

// ---------------------------------------------------------------------------
// DELETE /voice-cloning/model
// ---------------------------------------------------------------------------

/// Remove the caller's model record and every file stored for them.
pub async fn delete_model(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let removed = VoiceModelRepo::delete_for_user(state.store.as_ref(), &auth.uid).await?;
    samples::remove_user_files(&state.config.voice, &auth.uid)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(user_id = %auth.uid, removed, "Voice model deleted");
    Ok(Json(json!({
        "success": true,
        "message": "Voice model deleted successfully",
    })))
}
