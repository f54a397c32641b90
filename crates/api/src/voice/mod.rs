//! Voice cloning support: sample storage and simulated training.
//!
//! There is no speech engine in this service. Training records progress and
//! stores model metadata; synthesis reports the engine as unavailable once
//! the caller's model and sample have been checked.

pub mod samples;
pub mod training;
