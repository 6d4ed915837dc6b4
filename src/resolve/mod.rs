//! Dependency resolution: graph traversal and POM metadata.
//!
//! - [`load_dependency_coordinates`] walks the resolved dependency graph and
//!   applies ignore rules.
//! - [`load_pom_info`] merges each coordinate's POM with its parent chain.
//! - [`LocalRepository`] and [`InMemoryRepository`] supply raw POM models.

mod pom;
mod repository;
mod walker;

pub use pom::{PomResolver, RawModel, RawModelSource, RawScm, load_pom_info};
pub use repository::{InMemoryRepository, LocalRepository, parse_pom};
pub use walker::{DependencyResolution, load_dependency_coordinates};
