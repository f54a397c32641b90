//! Voice training progress table and the background training task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use coachly_core::types::now_timestamp;
use coachly_db::models::voice_model::CreateVoiceModel;
use coachly_db::repositories::VoiceModelRepo;
use coachly_db::DocumentStore;
use serde::Serialize;
use tokio::sync::RwLock;

/// Progress step, in percent, between training ticks.
const PROGRESS_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingState {
    Training,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingStatus {
    pub status: TrainingState,
    /// Percent complete, 0 to 100.
    pub progress: u8,
    pub user_id: String,
    pub started_at: String,
    pub error: Option<String>,
}

/// Training status by training id.
///
/// Each entry has a single writer: the task spawned for that training id.
/// Entries are kept for the life of the process.
#[derive(Debug, Default)]
pub struct TrainingStatusStore {
    entries: RwLock<HashMap<String, TrainingStatus>>,
}

impl TrainingStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new training run for `user_id` and return its id.
    pub async fn start(&self, user_id: &str) -> String {
        let training_id = uuid::Uuid::new_v4().to_string();
        let status = TrainingStatus {
            status: TrainingState::Training,
            progress: 0,
            user_id: user_id.to_string(),
            started_at: now_timestamp(),
            error: None,
        };
        self.entries
            .write()
            .await
            .insert(training_id.clone(), status);
        training_id
    }

    pub async fn get(&self, training_id: &str) -> Option<TrainingStatus> {
        self.entries.read().await.get(training_id).cloned()
    }

    pub async fn set_progress(&self, training_id: &str, progress: u8) {
        self.modify(training_id, |s| s.progress = progress.min(100)).await;
    }

    pub async fn complete(&self, training_id: &str) {
        self.modify(training_id, |s| {
            s.status = TrainingState::Completed;
            s.progress = 100;
        })
        .await;
    }

    pub async fn fail(&self, training_id: &str, error: String) {
        self.modify(training_id, |s| {
            s.status = TrainingState::Failed;
            s.error = Some(error);
        })
        .await;
    }

    async fn modify(&self, training_id: &str, f: impl FnOnce(&mut TrainingStatus)) {
        if let Some(status) = self.entries.write().await.get_mut(training_id) {
            f(status);
        }
    }
}

/// Everything the background task needs to finish a training run.
pub struct TrainingJob {
    pub training_id: String,
    pub user_id: String,
    pub audio_path: String,
    pub model_path: String,
    pub step: Duration,
}

/// Step progress from 0 to 100, then store the voice model metadata.
///
/// Runs detached from the request that started it; the outcome is only
/// visible through the status table.
pub async fn run_training(
    job: TrainingJob,
    training: Arc<TrainingStatusStore>,
    store: Arc<dyn DocumentStore>,
) {
    for progress in (0..=100).step_by(usize::from(PROGRESS_STEP)) {
        training.set_progress(&job.training_id, progress).await;
        tokio::time::sleep(job.step).await;
    }

    let input = CreateVoiceModel {
        user_id: job.user_id.clone(),
        training_id: job.training_id.clone(),
        model_path: job.model_path,
        audio_path: Some(job.audio_path),
        status: "completed".to_string(),
    };
    match VoiceModelRepo::upsert_for_user(store.as_ref(), &input).await {
        Ok(model) => {
            training.complete(&job.training_id).await;
            tracing::info!(
                user_id = %job.user_id,
                training_id = %job.training_id,
                voice_model_id = %model.id,
                "Voice training completed",
            );
        }
        Err(e) => {
            tracing::error!(
                user_id = %job.user_id,
                training_id = %job.training_id,
                error = %e,
                "Voice training failed to store model",
            );
            training.fail(&job.training_id, e.to_string()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachly_db::MemoryDocumentStore;

    #[tokio::test]
    async fn unknown_id_has_no_status() {
        let store = TrainingStatusStore::new();
        assert!(store.get("missing").await.is_none());
        // Writes to unknown ids are ignored.
        store.complete("missing").await;
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn training_runs_to_completion() {
        let training = Arc::new(TrainingStatusStore::new());
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let training_id = training.start("u1").await;

        let status = training.get(&training_id).await.unwrap();
        assert_eq!(status.status, TrainingState::Training);
        assert_eq!(status.progress, 0);

        let job = TrainingJob {
            training_id: training_id.clone(),
            user_id: "u1".into(),
            audio_path: "voice_audio/u1/sample.wav".into(),
            model_path: "voice_models/u1/voice_model.pt".into(),
            step: Duration::ZERO,
        };
        run_training(job, Arc::clone(&training), Arc::clone(&store)).await;

        let status = training.get(&training_id).await.unwrap();
        assert_eq!(status.status, TrainingState::Completed);
        assert_eq!(status.progress, 100);

        let model = VoiceModelRepo::find_for_user(store.as_ref(), "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(model.training_id, training_id);
    }
}
