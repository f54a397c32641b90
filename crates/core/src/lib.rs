//! Domain types and pure logic shared by the Coachly crates.
//!
//! Nothing in here performs I/O: prompt templates and their rendering,
//! model-output normalization, conversation flattening, and the intent
//! routing rule all live here so they can be unit tested in isolation.

pub mod conversation;
pub mod error;
pub mod intent;
pub mod normalize;
pub mod outcome;
pub mod prompts;
pub mod quiz;
pub mod template;
pub mod types;
pub mod validation;
