//! Typed record models and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` record struct decoded from a stored document
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   record supports edits

pub mod certification;
pub mod idea;
pub mod lesson;
pub mod session;
pub mod team;
pub mod voice_model;
