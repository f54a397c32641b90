//! Trained voice model metadata.

use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};

/// A user's trained voice. At most one per user; retraining replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceModel {
    pub id: DocId,
    pub user_id: String,
    pub training_id: String,
    pub model_path: String,
    #[serde(default)]
    pub audio_path: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVoiceModel {
    pub user_id: String,
    pub training_id: String,
    pub model_path: String,
    pub audio_path: Option<String>,
    pub status: String,
}
