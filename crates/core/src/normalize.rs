//! Response normalization: model text to JSON with a caller-chosen fallback.
//!
//! A single strict parse is attempted. There is no re-prompting, no
//! extraction of JSON from surrounding prose, and no schema check on success.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::outcome::Outcome;

/// Text returned to the simulator when the model output is not JSON.
pub const SIMULATION_PARSE_ERROR: &str = "Sorry, could not parse AI response.";

/// Text returned for team analytics when the model output is not JSON.
pub const ANALYTICS_PARSE_ERROR: &str = "Could not parse analytics response.";

/// Parse `raw` as one JSON value, or return exactly `fallback`.
pub fn normalize_json(raw: &str, fallback: Value) -> Outcome<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Outcome::Ok(value),
        Err(e) => Outcome::degraded(format!("model output is not valid JSON: {e}"), fallback),
    }
}

/// Parse `raw` into `T`, or return exactly `fallback`.
///
/// Used where the caller needs a typed result; text that is valid JSON but
/// the wrong shape degrades the same way as invalid JSON.
pub fn normalize_as<T: DeserializeOwned>(raw: &str, fallback: T) -> Outcome<T> {
    match serde_json::from_str::<T>(raw) {
        Ok(value) => Outcome::Ok(value),
        Err(e) => Outcome::degraded(format!("model output has unexpected shape: {e}"), fallback),
    }
}

/// Fallback for a simulation step (and the initial simulation).
pub fn simulation_fallback() -> Value {
    json!({
        "customerText": SIMULATION_PARSE_ERROR,
        "choices": [],
    })
}

/// Fallback for team analytics.
pub fn team_analytics_fallback() -> Value {
    json!({ "error": ANALYTICS_PARSE_ERROR })
}
