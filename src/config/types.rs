//! Policy types for license-gate runs.
//!
//! Two layers live here. [`PolicyFile`] is the serde model of the YAML policy
//! file and carries the JSON Schema. [`Policy`] is the immutable, validated
//! value the pipeline consumes; it is produced either from a `PolicyFile` or
//! through [`PolicyBuilder`].

use crate::error::{LicenseGateError, Result};
use crate::matching::Id;
use crate::model::Coordinate;
use crate::spdx::{SpdxLicenses, UrlCollisionPolicy};
use clap::ValueEnum;
use indexmap::{IndexMap, IndexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Actions
// ============================================================================

/// What to do when validation reports errors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ViolationAction {
    /// Log errors and fail the run
    #[default]
    Fail,
    /// Log errors and warnings but succeed
    Log,
    /// Log everything at info level and succeed
    Ignore,
}

impl fmt::Display for ViolationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Log => write!(f, "log"),
            Self::Ignore => write!(f, "ignore"),
        }
    }
}

/// What to do with an allow rule that matched nothing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum UnusedAction {
    /// Report as a warning
    #[default]
    Log,
    /// Report as info only
    Ignore,
}

// ============================================================================
// Validated policy
// ============================================================================

/// Suppression data attached to one ignore rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredData {
    pub reason: Option<String>,
    /// Also skip everything reachable only through the ignored dependency
    pub transitive: bool,
}

impl IgnoredData {
    pub fn new(reason: Option<&str>, transitive: bool) -> Self {
        Self {
            reason: reason.map(str::to_string),
            transitive,
        }
    }
}

/// Ignore rules consumed by the graph walker.
///
/// Group rules and `(group, artifact)` rules keep declaration order. A later
/// rule with the same key replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct DependencyConfig {
    ignored_groups: IndexMap<Id, IgnoredData>,
    ignored_coordinates: IndexMap<(Id, Id), IgnoredData>,
}

impl DependencyConfig {
    /// Create a validated ignore configuration.
    ///
    /// A transitive rule without a reason is rejected.
    pub fn new(
        ignored_groups: IndexMap<Id, IgnoredData>,
        ignored_coordinates: IndexMap<(Id, Id), IgnoredData>,
    ) -> Result<Self> {
        for (group, data) in &ignored_groups {
            check_transitive_reason(&group.to_string(), data)?;
        }
        for ((group, artifact), data) in &ignored_coordinates {
            check_transitive_reason(&format!("{group}:{artifact}"), data)?;
        }
        Ok(Self {
            ignored_groups,
            ignored_coordinates,
        })
    }

    #[must_use]
    pub const fn ignored_groups(&self) -> &IndexMap<Id, IgnoredData> {
        &self.ignored_groups
    }

    #[must_use]
    pub const fn ignored_coordinates(&self) -> &IndexMap<(Id, Id), IgnoredData> {
        &self.ignored_coordinates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ignored_groups.is_empty() && self.ignored_coordinates.is_empty()
    }
}

fn check_transitive_reason(target: &str, data: &IgnoredData) -> Result<()> {
    if data.transitive && data.reason.is_none() {
        return Err(LicenseGateError::config(format!(
            "Transitive dependency ignore on '{target}' is dangerous and requires a reason string"
        )));
    }
    Ok(())
}

/// Allow rules consumed by the validation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    pub allowed_identifiers: IndexSet<String>,
    /// URL to optional reason
    pub allowed_urls: IndexMap<String, Option<String>>,
    /// Coordinate to optional reason
    pub allowed_coordinates: IndexMap<Coordinate, Option<String>>,
    pub unused_identifier_action: UnusedAction,
    pub unused_url_action: UnusedAction,
    pub unused_dependency_action: UnusedAction,
}

/// A complete, validated policy.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub dependencies: DependencyConfig,
    pub validation: ValidationConfig,
    pub violation_action: ViolationAction,
    pub url_collision: UrlCollisionPolicy,
}

impl Policy {
    /// Create a `Policy` builder.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }
}

// ============================================================================
// Builder for Policy
// ============================================================================

/// Builder for constructing a [`Policy`] with a fluent API.
///
/// ```
/// use license_gate::config::Policy;
/// use license_gate::matching::Id;
/// use license_gate::spdx::SpdxLicenses;
///
/// let policy = Policy::builder()
///     .allow("Apache-2.0")
///     .allow_url("https://example.com/license", Some("reviewed"))
///     .ignore_group(Id::literal("com.example.internal"), None, false)
///     .build(SpdxLicenses::embedded())
///     .unwrap();
/// assert_eq!(policy.validation.allowed_identifiers.len(), 1);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct PolicyBuilder {
    ignored_groups: IndexMap<Id, IgnoredData>,
    ignored_coordinates: IndexMap<(Id, Id), IgnoredData>,
    validation: ValidationConfig,
    violation_action: ViolationAction,
    url_collision: UrlCollisionPolicy,
}

impl PolicyBuilder {
    /// Allow an SPDX identifier.
    pub fn allow(mut self, identifier: impl Into<String>) -> Self {
        self.validation.allowed_identifiers.insert(identifier.into());
        self
    }

    /// Allow a license URL. Prefer [`allow`](Self::allow) when an SPDX id exists.
    pub fn allow_url(mut self, url: impl Into<String>, reason: Option<&str>) -> Self {
        self.validation
            .allowed_urls
            .insert(url.into(), reason.map(str::to_string));
        self
    }

    /// Allow one exact dependency regardless of its licenses.
    pub fn allow_dependency(mut self, coordinate: Coordinate, reason: Option<&str>) -> Self {
        self.validation
            .allowed_coordinates
            .insert(coordinate, reason.map(str::to_string));
        self
    }

    /// Ignore every dependency in matching groups.
    pub fn ignore_group(mut self, group: Id, reason: Option<&str>, transitive: bool) -> Self {
        self.ignored_groups
            .insert(group, IgnoredData::new(reason, transitive));
        self
    }

    /// Ignore matching `(group, artifact)` dependencies.
    pub fn ignore_dependency(
        mut self,
        group: Id,
        artifact: Id,
        reason: Option<&str>,
        transitive: bool,
    ) -> Self {
        self.ignored_coordinates
            .insert((group, artifact), IgnoredData::new(reason, transitive));
        self
    }

    pub const fn violation_action(mut self, action: ViolationAction) -> Self {
        self.violation_action = action;
        self
    }

    pub const fn unused_identifier_action(mut self, action: UnusedAction) -> Self {
        self.validation.unused_identifier_action = action;
        self
    }

    pub const fn unused_url_action(mut self, action: UnusedAction) -> Self {
        self.validation.unused_url_action = action;
        self
    }

    pub const fn unused_dependency_action(mut self, action: UnusedAction) -> Self {
        self.validation.unused_dependency_action = action;
        self
    }

    pub const fn url_collision(mut self, policy: UrlCollisionPolicy) -> Self {
        self.url_collision = policy;
        self
    }

    /// Validate and build the policy.
    ///
    /// Fails when an allowed identifier is unknown to `licenses` or a
    /// transitive ignore has no reason.
    pub fn build(self, licenses: &SpdxLicenses) -> Result<Policy> {
        for identifier in &self.validation.allowed_identifiers {
            if !licenses.is_known_identifier(identifier) {
                return Err(LicenseGateError::config(format!(
                    "'{identifier}' is not a valid SPDX license identifier. \
                     Use allow_url for non-standard licenses."
                )));
            }
        }
        let dependencies = DependencyConfig::new(self.ignored_groups, self.ignored_coordinates)?;
        Ok(Policy {
            dependencies,
            validation: self.validation,
            violation_action: self.violation_action,
            url_collision: self.url_collision,
        })
    }
}

// ============================================================================
// Policy file model
// ============================================================================

/// The YAML policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PolicyFile {
    /// Licenses and dependencies that are acceptable
    pub allow: AllowSection,
    /// Dependencies to leave out of the check
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<IgnoreEntry>,
    /// Behavior when validation reports errors
    pub violation_action: ViolationAction,
    /// Behavior for allow rules that matched nothing
    pub unused_action: UnusedActions,
    /// Record selection when a license URL is shared by several SPDX ids
    pub url_collision: UrlCollisionPolicy,
}

/// The `allow` section of a policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AllowSection {
    /// SPDX license identifiers, e.g. `Apache-2.0`
    pub identifiers: Vec<String>,
    /// License URLs for licenses without an SPDX identifier
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<AllowedUrl>,
    /// Exact dependency coordinates allowed regardless of license
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<AllowedDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AllowedUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AllowedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// One ignore rule. Without `artifact` the whole group is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IgnoreEntry {
    pub group: IdPattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<IdPattern>,
    /// Also skip dependencies reachable only through the ignored one.
    /// Requires a reason.
    #[serde(default)]
    pub transitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A group or artifact id: a plain string, or `{ regex: "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdPattern {
    Literal(String),
    Regex { regex: String },
}

impl IdPattern {
    /// Compile into a matcher
    pub fn to_id(&self) -> std::result::Result<Id, regex::Error> {
        match self {
            Self::Literal(literal) => Ok(Id::literal(literal.clone())),
            Self::Regex { regex } => Id::regex(regex.clone()),
        }
    }
}

impl fmt::Display for IdPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Regex { regex } => write!(f, "/{regex}/"),
        }
    }
}

/// Per-category unused allow rule actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UnusedActions {
    pub identifiers: UnusedAction,
    pub urls: UnusedAction,
    pub dependencies: UnusedAction,
}

impl PolicyFile {
    /// Validate the file and convert it into an immutable [`Policy`].
    pub fn into_policy(self, licenses: &SpdxLicenses) -> Result<Policy> {
        use super::validation::Validatable;

        let errors = self.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(LicenseGateError::config(messages.join("; ")));
        }

        let mut builder = Policy::builder()
            .violation_action(self.violation_action)
            .unused_identifier_action(self.unused_action.identifiers)
            .unused_url_action(self.unused_action.urls)
            .unused_dependency_action(self.unused_action.dependencies)
            .url_collision(self.url_collision);

        for identifier in self.allow.identifiers {
            builder = builder.allow(identifier);
        }
        for allowed in self.allow.urls {
            builder = builder.allow_url(allowed.url, allowed.reason.as_deref());
        }
        for allowed in self.allow.dependencies {
            builder = builder.allow_dependency(
                Coordinate::new(allowed.group, allowed.artifact, allowed.version),
                allowed.reason.as_deref(),
            );
        }
        for (i, entry) in self.ignore.iter().enumerate() {
            let group = entry
                .group
                .to_id()
                .map_err(|e| LicenseGateError::config(format!("ignore[{i}].group: {e}")))?;
            let reason = entry.reason.as_deref();
            builder = match &entry.artifact {
                None => builder.ignore_group(group, reason, entry.transitive),
                Some(artifact) => {
                    let artifact = artifact.to_id().map_err(|e| {
                        LicenseGateError::config(format!("ignore[{i}].artifact: {e}"))
                    })?;
                    builder.ignore_dependency(group, artifact, reason, entry.transitive)
                }
            };
        }

        builder.build(licenses)
    }
}
