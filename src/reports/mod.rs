//! Report generation for license checks.
//!
//! Two files are produced for every run:
//! - `artifacts.json`: every inspected artifact with its classified licenses
//! - `validation.txt`: every validation result, policy-level first
//!
//! Both are deterministic for a given input and always end with a newline.

mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::error::{ErrorContext, LicenseGateError, Result};
use crate::model::ArtifactDetail;
use crate::validation::ValidationResults;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output formats, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Text,
}

impl ReportFormat {
    /// File name of this report inside the output directory
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Json => "artifacts.json",
            Self::Text => "validation.txt",
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate the report contents
    fn generate(&self, artifacts: &[ArtifactDetail], results: &ValidationResults)
    -> Result<String>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;

    /// Write the report to a writer, newline-terminated
    fn write_report(
        &self,
        artifacts: &[ArtifactDetail],
        results: &ValidationResults,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let report = ensure_trailing_newline(self.generate(artifacts, results)?);
        writer.write_all(report.as_bytes())?;
        Ok(())
    }
}

/// Append a newline unless the text already ends with one.
#[must_use]
pub fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Write both reports into `output_dir`, creating it if needed.
///
/// Returns the written paths in the order JSON, text.
pub fn write_reports(
    output_dir: &Path,
    artifacts: &[ArtifactDetail],
    results: &ValidationResults,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| LicenseGateError::io(output_dir, e))?;

    let generators: [&dyn ReportGenerator; 2] = [&JsonReporter::new(), &TextReporter::new()];
    let mut written = Vec::with_capacity(generators.len());
    for generator in generators {
        let path = output_dir.join(generator.format().file_name());
        let mut file = std::fs::File::create(&path).map_err(|e| LicenseGateError::io(&path, e))?;
        generator
            .write_report(artifacts, results, &mut file)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_trailing_newline() {
        assert_eq!(ensure_trailing_newline("a".into()), "a\n");
        assert_eq!(ensure_trailing_newline("a\n".into()), "a\n");
        assert_eq!(ensure_trailing_newline(String::new()), "\n");
    }

    #[test]
    fn test_write_reports() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested/out");
        let artifacts = vec![ArtifactDetail::new(Coordinate::new("g", "a", "1"))];

        let written = write_reports(&out, &artifacts, &ValidationResults::default()).unwrap();
        assert_eq!(written.len(), 2);

        let json = std::fs::read_to_string(out.join("artifacts.json")).unwrap();
        assert!(json.ends_with("]\n"));
        let text = std::fs::read_to_string(out.join("validation.txt")).unwrap();
        assert_eq!(text, "\n");
    }
}
