//! Policy configuration for license-gate.
//!
//! This module provides:
//! - The YAML policy file model ([`PolicyFile`]) and its JSON Schema
//! - Validation of policy files ([`Validatable`])
//! - The immutable [`Policy`] the pipeline runs against, and its builder
//! - Policy file discovery and loading
//!
//! # Policy File
//!
//! Place a `.license-gate.yaml` file in your project root or
//! `~/.config/license-gate/`:
//!
//! ```yaml
//! allow:
//!   identifiers: [Apache-2.0, MIT]
//! ignore:
//!   - group: com.mycompany.internal
//! violation_action: fail
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AllowSection, AllowedDependency, AllowedUrl, DependencyConfig, IdPattern, IgnoreEntry,
    IgnoredData, Policy, PolicyBuilder, PolicyFile, UnusedAction, UnusedActions,
    ValidationConfig, ViolationAction,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the policy file format.
///
/// Editors can use it for validation and autocompletion of
/// `.license-gate.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(PolicyFile);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
