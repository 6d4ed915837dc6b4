//! `validation.txt`: the human readable validation report.
//!
//! Policy-level results come first, then one block per artifact: a
//! `group:artifact:version` header followed by ` - ` prefixed results. The
//! two sections are separated by a blank line when both are present.

use super::{ReportFormat, ReportGenerator};
use crate::error::Result;
use crate::model::ArtifactDetail;
use crate::validation::ValidationResults;
use std::fmt::Write as _;

/// Plain-text validation report generator
#[derive(Debug, Default)]
pub struct TextReporter;

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, _artifacts: &[ArtifactDetail], results: &ValidationResults) -> Result<String> {
        let mut report = String::new();
        for result in &results.config_results {
            writeln!(report, "{result}")?;
        }
        if !results.config_results.is_empty() && !results.artifact_results.is_empty() {
            writeln!(report)?;
        }
        for (artifact, artifact_results) in &results.artifact_results {
            writeln!(report, "{}", artifact.coordinate)?;
            for result in artifact_results {
                writeln!(report, " - {result}")?;
            }
        }
        Ok(report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}
