//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&dyn DocumentStore` as the first argument and return typed models.

pub mod certification_repo;
pub mod idea_repo;
pub mod lesson_repo;
pub mod session_repo;
pub mod team_repo;
pub mod voice_model_repo;

pub use certification_repo::CertificationRepo;
pub use idea_repo::IdeaRepo;
pub use lesson_repo::LessonRepo;
pub use session_repo::SessionRepo;
pub use team_repo::TeamRepo;
pub use voice_model_repo::VoiceModelRepo;

use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::store::Document;

/// Decode every document into `T`, failing on the first malformed record.
pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, StoreError> {
    docs.iter().map(Document::decode).collect()
}
