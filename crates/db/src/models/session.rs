//! Logged simulation and career-coach exchanges.

use coachly_core::conversation::Turn;
use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Simulation,
    CareerCoach,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Simulation => "simulation",
            SessionKind::CareerCoach => "career_coach",
        }
    }
}

/// One request/response exchange. Stored as a log, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: DocId,
    pub user_id: String,
    pub kind: SessionKind,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub user_input: Option<String>,
    pub response: Value,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionLog {
    pub user_id: String,
    pub kind: SessionKind,
    pub history: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
    pub response: Value,
}
