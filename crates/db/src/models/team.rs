//! Team, team member and team analytics models.

use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: DocId,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A team as listed, with its current member count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    #[serde(flatten)]
    pub team: Team,
    pub member_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: DocId,
    pub team_id: DocId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// DTO for adding a member, standalone or as part of team creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTeamMember {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// DTO for creating a team with its initial members.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<CreateTeamMember>,
}

/// A stored analytics run for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalytics {
    pub id: DocId,
    pub team_id: DocId,
    pub user_id: String,
    pub member_count: u64,
    #[serde(default)]
    pub metrics: Vec<String>,
    pub analytics: Value,
    pub created_at: String,
}
