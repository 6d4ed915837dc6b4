//! Maven-style `group:artifact:version` coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A resolved dependency coordinate.
///
/// Ordering is lexicographic on `(group, artifact, version)`, which is the
/// order every report is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "groupId")]
    pub group: String,
    #[serde(rename = "artifactId")]
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// The coordinate of this artifact's POM document, e.g. `g:a:1.0@pom`.
    #[must_use]
    pub fn pom_coordinate(&self) -> String {
        format!("{self}@pom")
    }

    /// Whether `other` names the same artifact, ignoring the version.
    #[must_use]
    pub fn same_artifact(&self, other: &Self) -> bool {
        self.group == other.group && self.artifact == other.artifact
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Error returned when a string is not a `group:artifact:version` triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected 'group:artifact:version', got '{0}'")]
pub struct CoordinateParseError(pub String);

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(artifact), Some(version), None)
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(group, artifact, version))
            }
            _ => Err(CoordinateParseError(s.to_string())),
        }
    }
}
