//! Pipeline orchestration for license checks.
//!
//! Runs walk → resolve → normalize → validate as one deterministic pass and
//! turns the outcome into log lines, report files and an exit code.

mod check;
mod output;

pub use check::{CheckOutcome, run_check};
pub use output::{log_level, log_policy, log_results, write_outputs};

use crate::error::LicenseGateError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The dependency graph could not be walked
    #[error("Dependency walk failed: {source}")]
    WalkFailed {
        #[source]
        source: LicenseGateError,
    },

    /// POM metadata could not be resolved
    #[error("POM resolution failed: {source}")]
    ResolveFailed {
        #[source]
        source: LicenseGateError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: LicenseGateError,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no violations, or the violation action does not fail
    pub const SUCCESS: i32 = 0;
    /// Validation reported errors and the violation action is `fail`
    pub const VALIDATION_FAILED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::VALIDATION_FAILED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::ReportFailed {
            source: LicenseGateError::config("boom"),
        };
        assert_eq!(err.to_string(), "Report failed: Invalid configuration: boom");
    }
}
