//! Logging and report output for a finished check.

use super::{CheckOutcome, PipelineError};
use crate::config::{ValidationConfig, ViolationAction};
use crate::reports::write_reports;
use crate::validation::{ValidationResult, ValidationResults};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error, info, warn};

/// Log the allow rules a run validates against.
pub fn log_policy(config: &ValidationConfig) {
    debug!("Allowed identifiers:");
    if config.allowed_identifiers.is_empty() {
        debug!("  None");
    }
    for identifier in &config.allowed_identifiers {
        debug!("  {identifier}");
    }

    debug!("Allowed URLs:");
    if config.allowed_urls.is_empty() {
        debug!("  None");
    }
    for (url, reason) in &config.allowed_urls {
        match reason {
            Some(reason) => debug!("  {url} because {reason}"),
            None => debug!("  {url}"),
        }
    }

    debug!("Allowed coordinates:");
    if config.allowed_coordinates.is_empty() {
        debug!("  None");
    }
    for (coordinate, reason) in &config.allowed_coordinates {
        match reason {
            Some(reason) => debug!("  {coordinate} because {reason}"),
            None => debug!("  {coordinate}"),
        }
    }
}

/// Log every result, at a level that follows `action` for errors.
pub fn log_results(results: &ValidationResults, action: ViolationAction) {
    if !results.config_results.is_empty() {
        info!("Validation of policy:");
        for result in &results.config_results {
            log_result(result, action);
        }
    }
    for (artifact, artifact_results) in &results.artifact_results {
        info!("{}", artifact.coordinate);
        for result in artifact_results {
            log_result(result, action);
        }
    }
}

/// Level a result is logged at. `Ignore` logs everything at info.
pub fn log_level(result: &ValidationResult, action: ViolationAction) -> Level {
    match (result, action) {
        (ValidationResult::Info(_), _) | (_, ViolationAction::Ignore) => Level::INFO,
        (ValidationResult::Warning(_), _) => Level::WARN,
        (ValidationResult::Error(_), _) => Level::ERROR,
    }
}

fn log_result(result: &ValidationResult, action: ViolationAction) {
    let message = result.message();
    match log_level(result, action) {
        Level::ERROR => error!(" - {message}"),
        Level::WARN => warn!(" - {message}"),
        _ => info!(" - {message}"),
    }
}

/// Write `artifacts.json` and `validation.txt` into `output_dir`.
pub fn write_outputs(
    output_dir: &Path,
    outcome: &CheckOutcome,
) -> Result<Vec<PathBuf>, PipelineError> {
    let written = write_reports(output_dir, &outcome.artifacts, &outcome.results)
        .map_err(|source| PipelineError::ReportFailed { source })?;
    info!("Reports written to {}", output_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactDetail, Coordinate};
    use tempfile::TempDir;

    #[test]
    fn test_log_level_follows_action() {
        let info = ValidationResult::Info("i".into());
        let warning = ValidationResult::Warning("w".into());
        let error = ValidationResult::Error("e".into());

        for action in [ViolationAction::Fail, ViolationAction::Log] {
            assert_eq!(log_level(&info, action), Level::INFO);
            assert_eq!(log_level(&warning, action), Level::WARN);
            assert_eq!(log_level(&error, action), Level::ERROR);
        }
        for result in [&info, &warning, &error] {
            assert_eq!(log_level(result, ViolationAction::Ignore), Level::INFO);
        }
    }

    #[test]
    fn test_write_outputs_is_repeatable() {
        let tmp = TempDir::new().unwrap();
        let outcome = CheckOutcome {
            artifacts: vec![ArtifactDetail::new(Coordinate::new("g", "a", "1"))],
            results: ValidationResults {
                config_results: vec![ValidationResult::Warning("w".into())],
                artifact_results: vec![(
                    ArtifactDetail::new(Coordinate::new("g", "a", "1")),
                    vec![ValidationResult::Error("Artifact declares no licenses!".into())],
                )],
            },
        };

        write_outputs(tmp.path(), &outcome).unwrap();
        let first = std::fs::read_to_string(tmp.path().join("validation.txt")).unwrap();
        write_outputs(tmp.path(), &outcome).unwrap();
        let second = std::fs::read_to_string(tmp.path().join("validation.txt")).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            "WARNING: w\n\ng:a:1\n - ERROR: Artifact declares no licenses!\n"
        );
    }

    #[test]
    fn test_write_outputs_reports_io_failure() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = write_outputs(&blocker.join("out"), &CheckOutcome::default()).unwrap_err();
        assert!(matches!(err, PipelineError::ReportFailed { .. }));
    }
}
