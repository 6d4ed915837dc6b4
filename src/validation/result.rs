//! Validation result types.

use crate::model::ArtifactDetail;
use std::fmt;

/// One finding of the validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Info(String),
    Warning(String),
    Error(String),
}

impl ValidationResult {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(message) | Self::Warning(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_info(&self) -> bool {
        matches!(self, Self::Info(_))
    }
}

/// Report form: the message with an `ERROR: ` or `WARNING: ` prefix.
impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info(message) => write!(f, "{message}"),
            Self::Warning(message) => write!(f, "WARNING: {message}"),
            Self::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}

/// All findings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResults {
    /// Policy-level findings (unused and redundant rules)
    pub config_results: Vec<ValidationResult>,
    /// Per-artifact findings, in artifact order
    pub artifact_results: Vec<(ArtifactDetail, Vec<ValidationResult>)>,
}

impl ValidationResults {
    /// Whether any policy-level or per-artifact result is an error
    #[must_use]
    pub fn contains_errors(&self) -> bool {
        self.config_results.iter().any(ValidationResult::is_error)
            || self
                .artifact_results
                .iter()
                .any(|(_, results)| results.iter().any(ValidationResult::is_error))
    }

    /// Number of results at error level
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.config_results.iter().filter(|r| r.is_error()).count()
            + self
                .artifact_results
                .iter()
                .flat_map(|(_, results)| results)
                .filter(|r| r.is_error())
                .count()
    }
}
