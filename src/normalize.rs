//! License normalization.
//!
//! Turns merged POM metadata into [`ArtifactDetail`]s by classifying every
//! declared license against the SPDX table.

use crate::model::{ArtifactDetail, ArtifactScm, Coordinate, PomInfo};
use crate::spdx::{SpdxLicenses, UrlCollisionPolicy};
use std::collections::BTreeMap;

/// Classify the licenses of every artifact.
///
/// A declared license that matches one or more SPDX records contributes those
/// records; one that matches nothing is kept as an unknown license. The
/// result is sorted by coordinate.
#[must_use]
pub fn normalize_license_info(
    pom_infos: &BTreeMap<Coordinate, PomInfo>,
    licenses: &SpdxLicenses,
    collisions: UrlCollisionPolicy,
) -> Vec<ArtifactDetail> {
    let mut details: Vec<ArtifactDetail> = pom_infos
        .iter()
        .map(|(coordinate, info)| normalize_one(coordinate, info, licenses, collisions))
        .collect();
    details.sort_by(|a, b| a.coordinate.cmp(&b.coordinate));
    details
}

fn normalize_one(
    coordinate: &Coordinate,
    info: &PomInfo,
    licenses: &SpdxLicenses,
    collisions: UrlCollisionPolicy,
) -> ArtifactDetail {
    let mut detail = ArtifactDetail::new(coordinate.clone());
    detail.name.clone_from(&info.name);
    detail.scm = info.scm_url.clone().map(|url| ArtifactScm { url });

    for license in &info.licenses {
        let matched = licenses.find_license(license, collisions);
        if matched.is_empty() {
            detail.unknown_licenses.insert(license.clone());
        } else {
            detail.spdx_licenses.extend(matched);
        }
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawLicense;

    fn info(licenses: &[RawLicense]) -> PomInfo {
        PomInfo {
            name: Some("Library".to_string()),
            licenses: licenses.iter().cloned().collect(),
            scm_url: Some("https://github.com/example/library".to_string()),
        }
    }

    #[test]
    fn test_normalize_sorts_and_classifies() {
        let infos = BTreeMap::from([
            (
                Coordinate::new("com.z", "z", "1"),
                info(&[RawLicense::from_name("MIT")]),
            ),
            (
                Coordinate::new("com.a", "a", "1"),
                info(&[
                    RawLicense::from_url("http://www.apache.org/licenses/LICENSE-2.0.txt"),
                    RawLicense::new(Some("Proprietary"), Some("https://example.com/eula")),
                ]),
            ),
        ]);

        let details = normalize_license_info(
            &infos,
            SpdxLicenses::embedded(),
            UrlCollisionPolicy::default(),
        );
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].coordinate.group, "com.a");
        assert_eq!(details[0].name.as_deref(), Some("Library"));
        assert_eq!(
            details[0].scm.as_ref().map(|s| s.url.as_str()),
            Some("https://github.com/example/library")
        );

        let spdx: Vec<&str> = details[0]
            .spdx_licenses
            .iter()
            .map(|l| l.identifier.as_str())
            .collect();
        assert_eq!(spdx, vec!["Apache-2.0"]);
        assert_eq!(details[0].unknown_licenses.len(), 1);

        assert_eq!(details[1].spdx_licenses[0].identifier, "MIT");
        assert!(details[1].unknown_licenses.is_empty());
    }

    #[test]
    fn test_artifact_without_licenses() {
        let infos = BTreeMap::from([(Coordinate::new("g", "a", "1"), PomInfo::empty())]);
        let details = normalize_license_info(
            &infos,
            SpdxLicenses::embedded(),
            UrlCollisionPolicy::default(),
        );
        assert!(details[0].declares_no_licenses());
        assert!(details[0].scm.is_none());
    }
}
