//! **Dependency license auditing for resolved Maven-style dependency graphs.**
//!
//! `license-gate` walks a resolved dependency graph, reads every dependency's
//! POM (following the parent chain), classifies the declared licenses against
//! the SPDX license list and validates them against an allow-list policy.
//!
//! ## Core Concepts & Modules
//!
//! - **[`resolve`]**: the graph walker that applies ignore rules, and the POM
//!   inheritance resolver with its repository sources.
//! - **[`spdx`]**: the SPDX license table with identifier, URL and fallback
//!   URL lookups.
//! - **[`normalize`]**: turns POM metadata into [`ArtifactDetail`]s.
//! - **[`validation`]**: the allow-list engine and its results.
//! - **[`config`]**: the YAML policy file and the immutable [`Policy`].
//! - **[`pipeline`]**: runs all of the above and writes the reports.
//!
//! ## Getting Started
//!
//! ```no_run
//! use license_gate::{DependencyGraph, LocalRepository, Policy, SpdxLicenses, run_check};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = DependencyGraph::from_json(&std::fs::read_to_string("graph.json")?)?;
//!     let repository = LocalRepository::new(["/home/me/.m2/repository"]);
//!     let licenses = SpdxLicenses::embedded();
//!     let policy = Policy::builder()
//!         .allow("Apache-2.0")
//!         .allow("MIT")
//!         .build(licenses)?;
//!
//!     let outcome = run_check(&graph, &repository, &policy, licenses)?;
//!     for (artifact, results) in &outcome.results.artifact_results {
//!         println!("{}", artifact.coordinate);
//!         for result in results {
//!             println!(" - {result}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reports;
pub mod resolve;
pub mod spdx;
pub mod validation;

// Re-export main types for convenience
pub use config::{ConfigError, Policy, PolicyBuilder, PolicyFile, Validatable, ViolationAction};
pub use error::{ErrorContext, LicenseGateError, Result};
pub use matching::Id;
pub use model::{ArtifactDetail, Coordinate, DependencyGraph, PomInfo, RawLicense, SpdxLicense};
pub use normalize::normalize_license_info;
pub use pipeline::{CheckOutcome, PipelineError, run_check};
pub use reports::{JsonReporter, ReportFormat, ReportGenerator, TextReporter, write_reports};
pub use resolve::{
    InMemoryRepository, LocalRepository, RawModelSource, load_dependency_coordinates,
    load_pom_info,
};
pub use spdx::{SpdxLicenses, UrlCollisionPolicy};
pub use validation::{ValidationResult, ValidationResults, validate_artifacts};
