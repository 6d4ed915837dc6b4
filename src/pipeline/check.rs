//! The license check itself.

use super::PipelineError;
use super::output::log_policy;
use crate::config::{Policy, ViolationAction};
use crate::model::{ArtifactDetail, DependencyGraph};
use crate::normalize::normalize_license_info;
use crate::resolve::{RawModelSource, load_dependency_coordinates, load_pom_info};
use crate::spdx::SpdxLicenses;
use crate::validation::{ValidationResult, ValidationResults, validate_artifacts};
use tracing::{debug, info};

/// Everything a check produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Normalized artifacts sorted by coordinate
    pub artifacts: Vec<ArtifactDetail>,
    /// Validation results, ignore-rule warnings first
    pub results: ValidationResults,
}

impl CheckOutcome {
    /// Whether the run must fail under `action`.
    #[must_use]
    pub fn should_fail(&self, action: ViolationAction) -> bool {
        action == ViolationAction::Fail && self.results.contains_errors()
    }
}

/// Run the check for `graph` under `policy`.
///
/// Per-artifact problems end up in the results; only malformed graphs and
/// cyclic POM parents abort the run.
pub fn run_check<S>(
    graph: &DependencyGraph,
    source: &S,
    policy: &Policy,
    licenses: &SpdxLicenses,
) -> Result<CheckOutcome, PipelineError>
where
    S: RawModelSource + ?Sized,
{
    info!("STEP 1: Walk dependency graph");
    let resolution = load_dependency_coordinates(graph, &policy.dependencies)
        .map_err(|source| PipelineError::WalkFailed { source })?;
    info!(
        "{} dependencies to inspect out of {} components",
        resolution.coordinates.len(),
        graph.len()
    );

    info!("STEP 2: Read POM metadata and normalize license information");
    let pom_infos = load_pom_info(&resolution.coordinates, source)
        .map_err(|source| PipelineError::ResolveFailed { source })?;
    let artifacts = normalize_license_info(&pom_infos, licenses, policy.url_collision);
    for artifact in &artifacts {
        let spdx: Vec<&str> = artifact
            .spdx_licenses
            .iter()
            .map(|l| l.identifier.as_str())
            .collect();
        let unknown: Vec<String> = artifact
            .unknown_licenses
            .iter()
            .map(ToString::to_string)
            .collect();
        debug!("{} {:?} {:?}", artifact.coordinate, spdx, unknown);
    }

    info!("STEP 3: Validate license information");
    log_policy(&policy.validation);
    let mut results = validate_artifacts(&policy.validation, &artifacts);
    results.config_results.splice(
        0..0,
        resolution
            .config_warnings
            .into_iter()
            .map(ValidationResult::Warning),
    );

    Ok(CheckOutcome { artifacts, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Id;
    use crate::model::{Coordinate, RawLicense};
    use crate::resolve::{InMemoryRepository, RawModel};

    fn graph() -> DependencyGraph {
        let mut builder = DependencyGraph::builder();
        let root = builder.project(":app").unwrap();
        let a = builder.module("com.example", "a", "1.0").unwrap();
        builder.depends_on(root, a);
        builder.build_with_root(root)
    }

    fn repository() -> InMemoryRepository {
        let mut repository = InMemoryRepository::new();
        repository.insert(
            Coordinate::new("com.example", "a", "1.0"),
            RawModel {
                licenses: vec![RawLicense::from_url("https://opensource.org/licenses/MIT")],
                ..RawModel::default()
            },
        );
        repository
    }

    #[test]
    fn test_run_check_passes() {
        let licenses = SpdxLicenses::embedded();
        let policy = Policy::builder().allow("MIT").build(licenses).unwrap();
        let outcome = run_check(&graph(), &repository(), &policy, licenses).unwrap();

        assert_eq!(outcome.artifacts.len(), 1);
        assert!(!outcome.should_fail(ViolationAction::Fail));
    }

    #[test]
    fn test_walker_warnings_come_first() {
        let licenses = SpdxLicenses::embedded();
        let policy = Policy::builder()
            .allow("MIT")
            .allow("Apache-2.0")
            .ignore_group(Id::literal("org.unused"), None, false)
            .build(licenses)
            .unwrap();
        let outcome = run_check(&graph(), &repository(), &policy, licenses).unwrap();
        assert_eq!(
            outcome.results.config_results,
            vec![
                ValidationResult::Warning("Dependency ignore for org.unused is unused".into()),
                ValidationResult::Warning("Allowed SPDX identifier 'Apache-2.0' is unused".into()),
            ]
        );
    }

    #[test]
    fn test_violation_actions() {
        let licenses = SpdxLicenses::embedded();
        let policy = Policy::builder().build(licenses).unwrap();
        let outcome = run_check(&graph(), &repository(), &policy, licenses).unwrap();

        assert!(outcome.results.contains_errors());
        assert!(outcome.should_fail(ViolationAction::Fail));
        assert!(!outcome.should_fail(ViolationAction::Log));
        assert!(!outcome.should_fail(ViolationAction::Ignore));
    }
}
