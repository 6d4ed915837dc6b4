//! Validation engine.
//!
//! Checks each [`ArtifactDetail`](crate::model::ArtifactDetail) against the
//! allow rules of a [`ValidationConfig`](crate::config::ValidationConfig) and
//! audits allow rules that were never used.

mod engine;
mod result;

pub use engine::validate_artifacts;
pub use result::{ValidationResult, ValidationResults};
