use std::sync::Arc;

use coachly_db::DocumentStore;
use coachly_llm::ModelGateway;

use crate::auth::IdentityVerifier;
use crate::config::ServerConfig;
use crate::voice::training::TrainingStatusStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store (Postgres or in-memory).
    pub store: Arc<dyn DocumentStore>,
    /// Hosted model access.
    pub gateway: Arc<dyn ModelGateway>,
    /// Bearer token verification.
    pub identity: Arc<dyn IdentityVerifier>,
    pub config: Arc<ServerConfig>,
    /// In-process voice training progress, keyed by training id.
    pub training: Arc<TrainingStatusStore>,
}
