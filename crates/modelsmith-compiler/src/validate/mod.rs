//! Structural validation of generation targets.

mod structure;

pub use structure::{validate_model, validate_target};
