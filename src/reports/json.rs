//! `artifacts.json`: the normalized artifact list.

use super::{ReportFormat, ReportGenerator};
use crate::error::Result;
use crate::model::ArtifactDetail;
use crate::validation::ValidationResults;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, artifacts: &[ArtifactDetail], _results: &ValidationResults) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(artifacts)?
        } else {
            serde_json::to_string(artifacts)?
        };
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, RawLicense};

    #[test]
    fn test_artifacts_json() {
        let artifacts = vec![
            ArtifactDetail::new(Coordinate::new("g", "a", "1"))
                .with_unknown_license(RawLicense::from_url("https://x.example")),
        ];
        let json = JsonReporter::new()
            .generate(&artifacts, &ValidationResults::default())
            .unwrap();
        let parsed: Vec<ArtifactDetail> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, artifacts);
        assert!(json.contains("\n  {\n"));

        let compact = JsonReporter::new()
            .pretty(false)
            .generate(&[], &ValidationResults::default())
            .unwrap();
        assert_eq!(compact, "[]");
    }
}
