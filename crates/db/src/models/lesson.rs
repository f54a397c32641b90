//! Saved lesson model and DTOs.

use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};

/// A lesson saved by a user, either generated by `/micro-lesson` or entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: DocId,
    pub user_id: String,
    pub topic: String,
    /// The lesson body text.
    pub lesson: String,
    #[serde(default)]
    pub source: LessonSource,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonSource {
    Generated,
    #[default]
    Manual,
}

/// DTO for creating a lesson.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLesson {
    pub topic: String,
    pub lesson: String,
}

/// DTO for editing a lesson. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLesson {
    pub topic: Option<String>,
    pub lesson: Option<String>,
}
