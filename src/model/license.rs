//! License data structures: raw POM declarations, SPDX records, and the
//! per-artifact detail that validation operates on.

use super::Coordinate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A license as declared in a POM, before classification.
///
/// Also used for licenses that could not be matched to any SPDX record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawLicense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RawLicense {
    /// Create a raw license from optional name and URL
    pub fn new(name: Option<&str>, url: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            url: url.map(str::to_string),
        }
    }

    /// A license declared only by URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            name: None,
            url: Some(url.into()),
        }
    }

    /// A license declared only by name
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: None,
        }
    }
}

impl fmt::Display for RawLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.url) {
            (Some(name), Some(url)) => write!(f, "{name} ({url})"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(url)) => write!(f, "{url}"),
            (None, None) => write!(f, "<empty>"),
        }
    }
}

/// A license record from the SPDX license table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpdxLicense {
    /// SPDX short identifier, e.g. `Apache-2.0`
    pub identifier: String,
    /// Human readable display name
    pub name: String,
    /// Canonical license URL, always `https://` when the source was `http://`
    pub url: String,
}

impl SpdxLicense {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for SpdxLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

/// Source control information carried into the artifact report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactScm {
    pub url: String,
}

/// Metadata for one artifact after its parent chain has been merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomInfo {
    pub name: Option<String>,
    pub licenses: IndexSet<RawLicense>,
    pub scm_url: Option<String>,
}

impl PomInfo {
    /// The info reported for an artifact whose POM could not be found.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The unit of validation: one artifact with its classified licenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDetail {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub spdx_licenses: IndexSet<SpdxLicense>,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub unknown_licenses: IndexSet<RawLicense>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm: Option<ArtifactScm>,
}

impl ArtifactDetail {
    /// Create an artifact with no license information
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            name: None,
            spdx_licenses: IndexSet::new(),
            unknown_licenses: IndexSet::new(),
            scm: None,
        }
    }

    /// Add a classified SPDX license
    #[must_use]
    pub fn with_spdx_license(mut self, license: SpdxLicense) -> Self {
        self.spdx_licenses.insert(license);
        self
    }

    /// Add an unclassified license
    #[must_use]
    pub fn with_unknown_license(mut self, license: RawLicense) -> Self {
        self.unknown_licenses.insert(license);
        self
    }

    /// Whether the artifact declares no licenses at all
    #[must_use]
    pub fn declares_no_licenses(&self) -> bool {
        self.spdx_licenses.is_empty() && self.unknown_licenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_detail_json_shape() {
        let detail = ArtifactDetail::new(Coordinate::new("com.example", "example", "1.0"))
            .with_spdx_license(SpdxLicense::new(
                "MIT",
                "MIT License",
                "https://opensource.org/licenses/MIT",
            ))
            .with_unknown_license(RawLicense::from_name("Custom"));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "groupId": "com.example",
                "artifactId": "example",
                "version": "1.0",
                "spdxLicenses": [
                    {"identifier": "MIT", "name": "MIT License", "url": "https://opensource.org/licenses/MIT"}
                ],
                "unknownLicenses": [{"name": "Custom"}]
            })
        );
    }

    #[test]
    fn test_artifact_detail_reads_back_minimal_json() {
        let detail: ArtifactDetail = serde_json::from_str(
            r#"{"groupId": "g", "artifactId": "a", "version": "1", "scm": {"url": "https://x"}}"#,
        )
        .unwrap();
        assert!(detail.declares_no_licenses());
        assert_eq!(detail.scm.map(|s| s.url).as_deref(), Some("https://x"));
    }

    #[test]
    fn test_raw_license_display() {
        assert_eq!(RawLicense::new(Some("X"), Some("u")).to_string(), "X (u)");
        assert_eq!(RawLicense::default().to_string(), "<empty>");
    }
}
