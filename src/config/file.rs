//! Policy file loading and discovery.
//!
//! Supports loading the policy from YAML files with automatic discovery.

use super::types::PolicyFile;
use std::path::{Path, PathBuf};

// ============================================================================
// Discovery
// ============================================================================

/// Policy file names, in lookup order within one directory.
const POLICY_FILE_NAMES: &[&str] = &[
    ".license-gate.yaml",
    ".license-gate.yml",
    "license-gate.yaml",
    "license-gate.yml",
];

/// Directories searched when no explicit path is given, nearest first:
/// the working directory, the enclosing git checkout, the user config
/// directory (`license-gate/` below it) and the home directory.
fn search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(|dir| {
        dir.ancestors()
            .find(|ancestor| ancestor.join(".git").exists())
            .map(Path::to_path_buf)
    });

    cwd.into_iter()
        .chain(git_root)
        .chain(dirs::config_dir().map(|dir| dir.join("license-gate")))
        .chain(dirs::home_dir())
        .collect()
}

/// Locate the policy file.
///
/// An existing `explicit_path` always wins; otherwise the first policy file
/// found in [`search_dirs`] order is returned.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|path| path.exists()) {
        return Some(path.to_path_buf());
    }
    search_dirs().iter().find_map(|dir| policy_file_in(dir))
}

fn policy_file_in(dir: &Path) -> Option<PathBuf> {
    POLICY_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

// ============================================================================
// Loading
// ============================================================================

/// Failure to load a policy file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("policy file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read policy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Read and deserialize a [`PolicyFile`].
pub fn load_config_file(path: &Path) -> Result<PolicyFile, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigFileError::NotFound(path.to_path_buf())
        } else {
            ConfigFileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_yaml_ng::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the discovered policy, falling back to an empty one.
///
/// An empty policy allows nothing, so every artifact fails validation.
/// Returns the path the policy came from, if any. A policy file that is
/// found but cannot be read or parsed is an error.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(PolicyFile, Option<PathBuf>), ConfigFileError> {
    let Some(path) = discover_config_file(explicit_path) else {
        return Ok((PolicyFile::default(), None));
    };
    let policy = load_config_file(&path)?;
    Ok((policy, Some(path)))
}

// ============================================================================
// Example Generation
// ============================================================================

/// Generate a commented example policy file.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# license-gate policy
# Place this file at .license-gate.yaml in your project root or ~/.config/license-gate/

allow:
  # SPDX license identifiers accepted for any dependency
  identifiers:
    - Apache-2.0
    - MIT
  # Licenses without an SPDX identifier, matched by URL
  urls: []
  #  - url: https://example.com/license.html
  #    reason: reviewed by legal
  # Dependencies accepted regardless of their licenses
  dependencies: []
  #  - group: com.example
  #    artifact: example
  #    version: "1.0"
  #    reason: relicensed upstream in 1.1

# Dependencies that are not checked at all
ignore: []
#  - group: com.mycompany.internal
#  - group: { regex: "com\\.vendor\\..*" }
#    artifact: sdk
#    transitive: true          # also skip its dependencies; requires a reason
#    reason: commercial SDK

# fail | log | ignore
violation_action: fail

# Reporting of allow rules that matched nothing: log | ignore
unused_action:
  identifiers: log
  urls: log
  dependencies: log

# first-registered | shortest-identifier | all
url_collision: first-registered
"#
    .to_string()
}
