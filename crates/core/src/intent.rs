//! Intent classification results and the routing rule.
//!
//! The model classifies a free-form request; routing then forwards it to a
//! named module only on a `High` confidence match. There is no weighting,
//! no secondary heuristic and no state carried between classifications.

use serde::{Deserialize, Deserializer, Serialize};

use crate::normalize::normalize_as;
use crate::outcome::Outcome;

/// Modules a request can be routed to, with the description shown to the model.
pub const KNOWN_MODULES: &[(&str, &str)] = &[
    ("concepts", "ideas for how AI can improve workplace learning"),
    ("micro-lesson", "a short lesson on a specific topic"),
    ("simulation", "practice a customer conversation scenario"),
    ("recommendation", "a learning recommendation for a skill gap"),
    ("career-coach", "career guidance and growth coaching"),
    ("skills-forecast", "predict which skills to develop next"),
    ("video-quiz", "a quiz about a video the user watched"),
    ("team-dynamics", "team analytics and collaboration insights"),
    ("certifications", "certification recommendations and study plans"),
    ("web-search", "answer a general question from the web"),
    ("lessons", "browse or manage saved lessons"),
    ("voice-cloning", "record and use a personal synthetic voice"),
];

/// Module list formatted for the classification prompt.
pub fn modules_prompt_list() -> String {
    KNOWN_MODULES
        .iter()
        .map(|(name, description)| format!("- {name}: {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The model's self-assessed confidence in its classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Parse the model's confidence string. Anything other than the exact
    /// values `High` and `Medium` counts as `Low`.
    pub fn from_model(value: &str) -> Self {
        match value {
            "High" => Confidence::High,
            "Medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Confidence::from_model).unwrap_or_default())
    }
}

/// Parsed output of the intent classification prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub module_match: Option<String>,
    #[serde(default)]
    pub new_feature: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub follow_up_question: Option<String>,
}

impl ClassificationResult {
    /// All-null, `Low` confidence. Returned when the model output is unusable.
    pub fn fallback() -> Self {
        Self::default()
    }
}

/// Normalize raw model text into a [`ClassificationResult`].
pub fn parse_classification(raw: &str) -> Outcome<ClassificationResult> {
    normalize_as(raw, ClassificationResult::fallback())
}

/// Where a classified request should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub module: Option<String>,
    pub reason: String,
}

/// Apply the routing rule to a classification.
///
/// The module is set only when confidence is exactly `High` and the model
/// named a module. A blank or literal `"null"` module name counts as none.
pub fn route(classification: &ClassificationResult) -> RouteDecision {
    let module_match = classification
        .module_match
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case("null"));

    match (classification.confidence, module_match) {
        (Confidence::High, Some(module)) => RouteDecision {
            module: Some(module.to_string()),
            reason: format!("High confidence match for module '{module}'"),
        },
        (Confidence::High, None) => RouteDecision {
            module: None,
            reason: "No existing module matches this request".to_string(),
        },
        (confidence, _) => RouteDecision {
            module: None,
            reason: format!(
                "Confidence is {}; routing requires High confidence",
                confidence.as_str()
            ),
        },
    }
}
