//! Allow-list validation of normalized artifacts.

use super::result::{ValidationResult, ValidationResults};
use crate::config::{UnusedAction, ValidationConfig};
use crate::model::{ArtifactDetail, Coordinate};
use indexmap::IndexSet;

/// Allow rules not yet consumed by any artifact.
struct UnusedRules<'a> {
    identifiers: IndexSet<&'a str>,
    urls: IndexSet<&'a str>,
    coordinates: IndexSet<&'a Coordinate>,
}

impl<'a> UnusedRules<'a> {
    fn new(config: &'a ValidationConfig) -> Self {
        Self {
            identifiers: config.allowed_identifiers.iter().map(String::as_str).collect(),
            urls: config.allowed_urls.keys().map(String::as_str).collect(),
            coordinates: config.allowed_coordinates.keys().collect(),
        }
    }

    fn into_results(self, config: &ValidationConfig) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        for identifier in self.identifiers {
            results.push(unused(
                config.unused_identifier_action,
                format!("Allowed SPDX identifier '{identifier}' is unused"),
            ));
        }
        for url in self.urls {
            results.push(unused(
                config.unused_url_action,
                format!("Allowed license URL '{url}' is unused"),
            ));
        }
        for coordinate in self.coordinates {
            results.push(unused(
                config.unused_dependency_action,
                format!("Allowed dependency '{coordinate}' is unused"),
            ));
        }
        results
    }
}

fn unused(action: UnusedAction, message: String) -> ValidationResult {
    match action {
        UnusedAction::Log => ValidationResult::Warning(message),
        UnusedAction::Ignore => ValidationResult::Info(message),
    }
}

/// Validate every artifact against the allow rules.
///
/// Multiple licenses on one artifact are alternatives, so the first
/// acceptable license validates it. Precedence is an allowed SPDX identifier,
/// then an allowed URL of an SPDX license (warning, the identifier should be
/// used instead), then an allowed URL of an unknown license. Otherwise every
/// declared license is an error, unless the exact coordinate is allowed.
#[must_use]
pub fn validate_artifacts(
    config: &ValidationConfig,
    artifacts: &[ArtifactDetail],
) -> ValidationResults {
    let mut unused = UnusedRules::new(config);
    let mut artifact_results = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let mut results = match find_allowed_license(config, artifact, &mut unused) {
            Some(result) => vec![result],
            None => rejected_licenses(artifact),
        };

        if results.iter().any(ValidationResult::is_error) {
            apply_allowed_coordinate(config, artifact, &mut results, &mut unused);
        }

        artifact_results.push((artifact.clone(), results));
    }

    ValidationResults {
        config_results: unused.into_results(config),
        artifact_results,
    }
}

fn find_allowed_license(
    config: &ValidationConfig,
    artifact: &ArtifactDetail,
    unused: &mut UnusedRules<'_>,
) -> Option<ValidationResult> {
    if let Some(license) = artifact
        .spdx_licenses
        .iter()
        .find(|license| config.allowed_identifiers.contains(&license.identifier))
    {
        unused.identifiers.shift_remove(license.identifier.as_str());
        return Some(ValidationResult::Info(format!(
            "SPDX identifier '{}' allowed",
            license.identifier
        )));
    }

    if let Some(license) = artifact
        .spdx_licenses
        .iter()
        .find(|license| config.allowed_urls.contains_key(&license.url))
    {
        unused.urls.shift_remove(license.url.as_str());
        return Some(ValidationResult::Warning(format!(
            "License URL '{}' was allowed but could use SPDX identifier '{}'",
            license.url, license.identifier
        )));
    }

    artifact.unknown_licenses.iter().find_map(|license| {
        let url = license.url.as_deref()?;
        let reason = config.allowed_urls.get(url)?;
        unused.urls.shift_remove(url);
        Some(ValidationResult::Info(format!(
            "Unknown license URL '{url}' allowed{}",
            because(reason.as_deref())
        )))
    })
}

fn rejected_licenses(artifact: &ArtifactDetail) -> Vec<ValidationResult> {
    if artifact.declares_no_licenses() {
        return vec![ValidationResult::Error(
            "Artifact declares no licenses!".to_string(),
        )];
    }

    let spdx = artifact.spdx_licenses.iter().map(|license| {
        ValidationResult::Error(format!(
            "SPDX identifier '{}' is NOT allowed",
            license.identifier
        ))
    });
    let unknown = artifact
        .unknown_licenses
        .iter()
        .map(|license| match (&license.url, &license.name) {
            (Some(url), _) => {
                ValidationResult::Error(format!("Unknown license URL '{url}' is NOT allowed"))
            }
            (None, name) => ValidationResult::Error(format!(
                "Unknown license name '{}' with no URL is NOT allowed",
                name.as_deref().unwrap_or("<none>")
            )),
        });
    spdx.chain(unknown).collect()
}

fn apply_allowed_coordinate(
    config: &ValidationConfig,
    artifact: &ArtifactDetail,
    results: &mut Vec<ValidationResult>,
    unused: &mut UnusedRules<'_>,
) {
    let coordinate = &artifact.coordinate;
    if let Some(reason) = config.allowed_coordinates.get(coordinate) {
        unused.coordinates.shift_remove(coordinate);
        results.push(ValidationResult::Info(format!(
            "Coordinate version is allowed{}",
            because(reason.as_deref())
        )));
        for result in results.iter_mut() {
            if let ValidationResult::Error(message) = result {
                *result = ValidationResult::Info(std::mem::take(message));
            }
        }
    } else if let Some(candidate) = config
        .allowed_coordinates
        .keys()
        .find(|allowed| allowed.same_artifact(coordinate))
    {
        results.push(ValidationResult::Warning(format!(
            "Coordinates match an allowed dependency but version does not match ({} != {})",
            candidate.version, coordinate.version
        )));
    }
}

fn because(reason: Option<&str>) -> String {
    reason.map_or_else(String::new, |reason| format!(" because {reason}"))
}
