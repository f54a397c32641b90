//! Collection names used across the application.

pub const LESSONS: &str = "lessons";
pub const TEAMS: &str = "teams";
pub const TEAM_MEMBERS: &str = "team_members";
pub const TEAM_ANALYTICS: &str = "team_analytics";
/// Certification profiles and recommendation history, told apart by `type`.
pub const CERTIFICATIONS: &str = "certifications";
/// Simulation and career-coach session logs, told apart by `kind`.
pub const SESSIONS: &str = "sessions";
pub const UNKNOWN_INTENTS: &str = "unknown_intents";
pub const VOICE_MODELS: &str = "voice_models";
