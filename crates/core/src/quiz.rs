//! Video quiz items and their parse fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::normalize_json;
use crate::outcome::Outcome;

/// A multiple-choice question generated from a video summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    /// Four options, conventionally labelled A to D.
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl QuizItem {
    /// The single item returned when the model's quiz cannot be parsed.
    pub fn placeholder() -> Self {
        Self {
            question: "Quiz could not be generated for this video.".to_string(),
            options: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            answer: "A".to_string(),
            explanation: "The AI response could not be parsed. Please try again.".to_string(),
        }
    }
}

/// Fallback quiz: a one-element sequence holding [`QuizItem::placeholder`].
pub fn quiz_fallback() -> Value {
    serde_json::to_value(vec![QuizItem::placeholder()]).unwrap_or(Value::Array(Vec::new()))
}

/// Normalize raw model text into a quiz.
///
/// Any valid JSON is returned as-is; only unparseable text falls back.
pub fn parse_quiz(raw: &str) -> Outcome<Value> {
    normalize_json(raw, quiz_fallback())
}
