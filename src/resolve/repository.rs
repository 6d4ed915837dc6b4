//! POM sources: a reader for POM XML and two [`RawModelSource`]s.

use super::pom::{RawModel, RawModelSource, RawScm};
use crate::error::{ErrorContext, LicenseGateError, PomErrorKind, Result};
use crate::model::{Coordinate, RawLicense};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// =============================================================================
// POM XML structures for deserialization
// Unknown elements (dependencies, build, ...) are skipped.
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename = "project")]
struct PomXml {
    name: Option<String>,
    parent: Option<ParentXml>,
    licenses: Option<LicensesXml>,
    scm: Option<ScmXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParentXml {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicensesXml {
    #[serde(rename = "license", default)]
    license: Vec<LicenseXml>,
}

#[derive(Debug, Deserialize)]
struct LicenseXml {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScmXml {
    #[serde(rename = "@child.scm.url.inherit.append.path")]
    child_url_inherit_append_path: Option<String>,
    url: Option<String>,
}

/// Trimmed, non-empty text content.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a POM document into a [`RawModel`].
///
/// The parent is only recorded when its group, artifact and version are all
/// present. The append-path attribute is `true` when it reads `true` in any
/// case; any other value counts as an opt-out.
pub fn parse_pom(xml: &str) -> Result<RawModel> {
    let pom: PomXml = quick_xml::de::from_str(xml).map_err(|e| {
        LicenseGateError::pom("parsing POM", PomErrorKind::InvalidXml(e.to_string()))
    })?;

    let parent = pom.parent.and_then(|parent| {
        match (
            text(parent.group_id),
            text(parent.artifact_id),
            text(parent.version),
        ) {
            (Some(group), Some(artifact), Some(version)) => {
                Some(Coordinate::new(group, artifact, version))
            }
            _ => None,
        }
    });

    let licenses = pom
        .licenses
        .map(|licenses| {
            licenses
                .license
                .into_iter()
                .map(|license| RawLicense {
                    name: text(license.name),
                    url: text(license.url),
                })
                .collect()
        })
        .unwrap_or_default();

    let scm = pom.scm.map(|scm| RawScm {
        url: text(scm.url),
        child_url_inherit_append_path: text(scm.child_url_inherit_append_path)
            .map(|flag| flag.eq_ignore_ascii_case("true")),
    });

    Ok(RawModel {
        name: text(pom.name),
        licenses,
        scm,
        parent,
    })
}

/// POM files in one or more Maven2 layout directories.
///
/// `<root>/<group as path>/<artifact>/<version>/<artifact>-<version>.pom`;
/// roots are searched in order.
#[derive(Debug, Clone, Default)]
pub struct LocalRepository {
    roots: Vec<PathBuf>,
}

impl LocalRepository {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Location of a coordinate's POM below `root`
    #[must_use]
    pub fn pom_path(root: &Path, coordinate: &Coordinate) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(coordinate.group.split('.'));
        path.push(&coordinate.artifact);
        path.push(&coordinate.version);
        path.push(format!(
            "{}-{}.pom",
            coordinate.artifact, coordinate.version
        ));
        path
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl RawModelSource for LocalRepository {
    fn raw_model(&self, coordinate: &Coordinate) -> Option<RawModel> {
        let path = self
            .roots
            .iter()
            .map(|root| Self::pom_path(root, coordinate))
            .find(|path| path.is_file());
        let Some(path) = path else {
            debug!("{} not found in {} repositories", coordinate.pom_coordinate(), self.roots.len());
            return None;
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        match parse_pom(&content) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// POM models held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    models: HashMap<Coordinate, RawModel>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: Coordinate, model: RawModel) {
        self.models.insert(coordinate, model);
    }

    /// Parse and add a POM document.
    pub fn insert_pom(&mut self, coordinate: Coordinate, xml: &str) -> Result<()> {
        let model = parse_pom(xml).with_context(|| coordinate.pom_coordinate())?;
        self.models.insert(coordinate, model);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl RawModelSource for InMemoryRepository {
    fn raw_model(&self, coordinate: &Coordinate) -> Option<RawModel> {
        self.models.get(coordinate).cloned()
    }
}
