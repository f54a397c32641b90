use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::voice;
use crate::state::AppState;

/// Largest accepted voice sample upload.
const MAX_SAMPLE_BYTES: usize = 50 * 1024 * 1024;

/// Voice cloning routes mounted at `/voice-cloning`.
///
/// ```text
/// POST   /upload-sample          -> upload_sample
/// POST   /train                  -> train
/// GET    /training-status/{id}   -> training_status
/// GET    /models                 -> list_models
/// POST   /synthesize             -> synthesize
/// DELETE /model                  -> delete_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload-sample",
            post(voice::upload_sample).layer(DefaultBodyLimit::max(MAX_SAMPLE_BYTES)),
        )
        .route("/train", post(voice::train))
        .route("/training-status/{id}", get(voice::training_status))
        .route("/models", get(voice::list_models))
        .route("/synthesize", post(voice::synthesize))
        .route("/model", delete(voice::delete_model))
}
