//! Core data model shared by every stage of the license check.
//!
//! - [`Coordinate`] identifies one resolved dependency.
//! - [`DependencyGraph`] is the arena the walker traverses.
//! - [`PomInfo`], [`RawLicense`], [`SpdxLicense`] and [`ArtifactDetail`] carry
//!   license metadata from POM resolution through validation.

mod coordinate;
mod graph;
mod license;

pub use coordinate::{Coordinate, CoordinateParseError};
pub use graph::{
    Component, ComponentDocument, ComponentKind, DependencyEdge, DependencyGraph, EdgeDocument,
    GraphBuilder, GraphDocument, NodeIndex,
};
pub use license::{ArtifactDetail, ArtifactScm, PomInfo, RawLicense, SpdxLicense};
