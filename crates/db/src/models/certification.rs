//! Certification profile and recommendation history models.
//!
//! Both live in the `certifications` collection, told apart by `type`.

use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};

pub const PROFILE_TYPE: &str = "profile";
pub const RECOMMENDATION_TYPE: &str = "recommendation";

/// A user's certification profile. At most one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationProfile {
    pub id: DocId,
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goals: String,
    pub experience_level: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Profile fields as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goals: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
}

fn default_experience_level() -> String {
    "intermediate".to_string()
}

/// One stored `/certifications/recommend` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecommendation {
    pub id: DocId,
    pub user_id: String,
    pub profile: ProfileInput,
    pub recommendations: String,
    pub created_at: String,
}
