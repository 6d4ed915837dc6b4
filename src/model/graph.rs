//! Arena representation of a resolved dependency graph.
//!
//! Components live in a flat `Vec` and refer to each other by [`NodeIndex`],
//! so traversal state can be a plain index-keyed vector instead of a hash set
//! of identities. The graph is built either programmatically through
//! [`GraphBuilder`] or from the JSON [`GraphDocument`] exported by a build tool.

use super::Coordinate;
use crate::error::{GraphErrorKind, LicenseGateError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a component inside a [`DependencyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Classification of a resolved component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
    /// A project of the build itself (local dependency)
    Project { path: String },
    /// A versioned module fetched from a repository
    Module { coordinate: Coordinate },
    /// Anything the build tool reported that is neither of the above
    Other { kind: String },
}

/// An outgoing dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyEdge {
    /// The requested dependency resolved to a component in the graph
    Resolved(NodeIndex),
    /// Resolution failed; only the requested notation is known
    Unresolved { requested: String },
}

/// One node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Identity as reported by the build tool
    pub id: String,
    pub kind: ComponentKind,
    /// Platform (BOM) components only constrain versions and carry no code
    pub platform: bool,
    /// Edges in declaration order
    pub dependencies: Vec<DependencyEdge>,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A resolved dependency graph with a designated root.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    components: Vec<Component>,
    root: NodeIndex,
}

impl DependencyGraph {
    /// Start building a graph
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// The root component (usually the project being checked)
    #[must_use]
    pub const fn root(&self) -> NodeIndex {
        self.root
    }

    /// Look up a component by index
    #[must_use]
    pub fn component(&self, index: NodeIndex) -> &Component {
        &self.components[index.0]
    }

    /// Number of components in the arena
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over all components in insertion order
    pub fn components(&self) -> impl Iterator<Item = (NodeIndex, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (NodeIndex(i), c))
    }

    /// Parse the JSON graph document format.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(json).map_err(|e| {
            LicenseGateError::graph(
                "parsing graph document",
                GraphErrorKind::InvalidDocument(e.to_string()),
            )
        })?;
        Self::from_document(document)
    }

    /// Build the arena from a deserialized [`GraphDocument`].
    pub fn from_document(document: GraphDocument) -> Result<Self> {
        let mut builder = GraphBuilder::default();
        for component in &document.components {
            let kind = match component.kind.as_str() {
                "project" => ComponentKind::Project {
                    path: component.id.clone(),
                },
                "module" => ComponentKind::Module {
                    coordinate: Coordinate::new(
                        component.group.clone().unwrap_or_default(),
                        component.artifact.clone().unwrap_or_default(),
                        component.version.clone().unwrap_or_default(),
                    ),
                },
                other => ComponentKind::Other {
                    kind: other.to_string(),
                },
            };
            builder.add(component.id.clone(), kind, component.platform)?;
        }

        for component in &document.components {
            for edge in &component.dependencies {
                match (&edge.selected, &edge.requested) {
                    (Some(selected), _) => builder.add_edge(&component.id, selected)?,
                    (None, Some(requested)) => builder.add_unresolved(&component.id, requested)?,
                    (None, None) => {
                        return Err(LicenseGateError::graph(
                            format!("edge of '{}'", component.id),
                            GraphErrorKind::InvalidDocument(
                                "edge needs 'selected' or 'requested'".to_string(),
                            ),
                        ));
                    }
                }
            }
        }

        builder.build(&document.root)
    }
}

/// Incremental graph construction keyed by component identity.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    components: Vec<Component>,
    by_id: IndexMap<String, NodeIndex>,
}

impl GraphBuilder {
    /// Add a component; identities must be unique.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        kind: ComponentKind,
        platform: bool,
    ) -> Result<NodeIndex> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(LicenseGateError::graph(
                "building dependency graph",
                GraphErrorKind::DuplicateComponent(id),
            ));
        }
        let index = NodeIndex(self.components.len());
        self.by_id.insert(id.clone(), index);
        self.components.push(Component {
            id,
            kind,
            platform,
            dependencies: Vec::new(),
        });
        Ok(index)
    }

    /// Add a local project component
    pub fn project(&mut self, path: impl Into<String>) -> Result<NodeIndex> {
        let path = path.into();
        self.add(path.clone(), ComponentKind::Project { path }, false)
    }

    /// Add a versioned module, identified by its `g:a:v` string
    pub fn module(
        &mut self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Result<NodeIndex> {
        let coordinate = Coordinate::new(group, artifact, version);
        self.add(
            coordinate.to_string(),
            ComponentKind::Module { coordinate },
            false,
        )
    }

    /// Add a platform (BOM) module
    pub fn platform(
        &mut self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Result<NodeIndex> {
        let coordinate = Coordinate::new(group, artifact, version);
        self.add(
            coordinate.to_string(),
            ComponentKind::Module { coordinate },
            true,
        )
    }

    /// Look up an already added component
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Connect two components by identity
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        let from_index = self.require(from, from)?;
        let to_index = self.require(from, to)?;
        self.components[from_index.0]
            .dependencies
            .push(DependencyEdge::Resolved(to_index));
        Ok(())
    }

    /// Connect two components by index
    pub fn depends_on(&mut self, from: NodeIndex, to: NodeIndex) {
        self.components[from.0]
            .dependencies
            .push(DependencyEdge::Resolved(to));
    }

    /// Record a dependency that failed to resolve
    pub fn add_unresolved(&mut self, from: &str, requested: &str) -> Result<()> {
        let from_index = self.require(from, from)?;
        self.components[from_index.0]
            .dependencies
            .push(DependencyEdge::Unresolved {
                requested: requested.to_string(),
            });
        Ok(())
    }

    fn require(&self, from: &str, id: &str) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| {
            LicenseGateError::graph(
                "building dependency graph",
                GraphErrorKind::DanglingEdge {
                    from: from.to_string(),
                    to: id.to_string(),
                },
            )
        })
    }

    /// Finish the graph with the given root identity
    pub fn build(self, root: &str) -> Result<DependencyGraph> {
        let root = self.index_of(root).ok_or_else(|| {
            LicenseGateError::graph(
                "building dependency graph",
                GraphErrorKind::MissingRoot(root.to_string()),
            )
        })?;
        Ok(DependencyGraph {
            components: self.components,
            root,
        })
    }

    /// Finish the graph with a root given by index
    #[must_use]
    pub fn build_with_root(self, root: NodeIndex) -> DependencyGraph {
        DependencyGraph {
            components: self.components,
            root,
        }
    }
}

// ============================================================================
// JSON document format
// ============================================================================

/// Serialized graph as exported by the build-tool integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Identity of the root component
    pub root: String,
    pub components: Vec<ComponentDocument>,
}

/// One serialized component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDocument {
    pub id: String,
    /// `project`, `module`, or anything else (rejected during traversal)
    pub kind: String,
    #[serde(default)]
    pub platform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<EdgeDocument>,
}

/// One serialized edge. `selected` wins when both fields are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<String>,
}
