//! Boundary validation for user-supplied record fields.

use crate::error::CoreError;

/// Maximum length for short text fields (titles, names, roles).
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for long text fields (lesson content, descriptions).
pub const MAX_CONTENT_LENGTH: usize = 20_000;

/// Statuses an unknown-intent idea can move through on the roadmap.
pub const IDEA_STATUSES: &[&str] = &["Idea", "Planned", "In Review", "Coming Soon", "Implemented"];

/// Status assigned to newly logged ideas.
pub const DEFAULT_IDEA_STATUS: &str = "Idea";

/// Experience levels accepted on a certification profile.
pub const EXPERIENCE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

/// Validate a required short text field: non-blank and within length limit.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a long text field: length check only (can be empty).
pub fn validate_content(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an email address. Only the basic `local@domain` shape is checked.
pub fn validate_email(value: &str) -> Result<(), CoreError> {
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(CoreError::Validation(format!(
            "'{value}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate a roadmap status against [`IDEA_STATUSES`].
pub fn validate_idea_status(status: &str) -> Result<(), CoreError> {
    if !IDEA_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            IDEA_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Validate a profile experience level against [`EXPERIENCE_LEVELS`].
pub fn validate_experience_level(level: &str) -> Result<(), CoreError> {
    if !EXPERIENCE_LEVELS.contains(&level) {
        return Err(CoreError::Validation(format!(
            "Invalid experience_level '{level}'. Must be one of: {}",
            EXPERIENCE_LEVELS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_name_is_rejected() {
        assert_matches!(validate_name("title", "   "), Err(CoreError::Validation(_)));
        assert!(validate_name("title", "Feedback basics").is_ok());
    }

    #[test]
    fn long_name_is_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("name", &long).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("nope").is_err());
    }

    #[test]
    fn idea_statuses() {
        assert!(validate_idea_status("Coming Soon").is_ok());
        assert!(validate_idea_status("coming soon").is_err());
    }

    #[test]
    fn experience_levels() {
        assert!(validate_experience_level("beginner").is_ok());
        assert!(validate_experience_level("guru").is_err());
    }
}
