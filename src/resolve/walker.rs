//! Dependency graph walker.
//!
//! Depth-first, pre-order traversal from the graph root that applies ignore
//! rules and collects the coordinates whose licenses must be checked.

use crate::config::{DependencyConfig, IgnoredData};
use crate::error::{GraphErrorKind, LicenseGateError, Result};
use crate::matching::Id;
use crate::model::{ComponentKind, Coordinate, DependencyEdge, DependencyGraph, NodeIndex};
use indexmap::IndexSet;
use std::collections::BTreeSet;
use tracing::debug;

/// Output of a graph walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyResolution {
    /// Distinct coordinates to inspect, in sorted order
    pub coordinates: BTreeSet<Coordinate>,
    /// Unused and redundant ignore rules
    pub config_warnings: Vec<String>,
}

/// Which rule matched a module during traversal.
#[derive(Debug, Clone, Copy)]
enum RuleHit {
    Group(usize),
    Coordinate(usize),
}

/// Tracks ignore rules that have not matched anything yet.
struct RuleUsage<'a> {
    config: &'a DependencyConfig,
    unused_groups: IndexSet<usize>,
    unused_coordinates: IndexSet<usize>,
}

impl<'a> RuleUsage<'a> {
    fn new(config: &'a DependencyConfig, warnings: &mut Vec<String>) -> Self {
        let groups = config.ignored_groups();
        let unused_groups = (0..groups.len()).collect();

        let mut unused_coordinates = IndexSet::new();
        for (i, (group, artifact)) in config.ignored_coordinates().keys().enumerate() {
            match groups.keys().find(|rule| rule.subsumes(group)) {
                Some(covering) => warnings.push(format!(
                    "Ignore for {group}:{artifact} is redundant as {covering} is also ignored"
                )),
                None => {
                    unused_coordinates.insert(i);
                }
            }
        }

        Self {
            config,
            unused_groups,
            unused_coordinates,
        }
    }

    /// Find the rule for a module: literal groups, regex groups in
    /// declaration order, then coordinate rules.
    fn lookup(&mut self, coordinate: &Coordinate) -> Option<&'a IgnoredData> {
        let hit = self.find(coordinate)?;
        let config = self.config;
        Some(match hit {
            RuleHit::Group(i) => {
                self.unused_groups.shift_remove(&i);
                &config.ignored_groups()[i]
            }
            RuleHit::Coordinate(i) => {
                self.unused_coordinates.shift_remove(&i);
                &config.ignored_coordinates()[i]
            }
        })
    }

    fn find(&self, coordinate: &Coordinate) -> Option<RuleHit> {
        let groups = self.config.ignored_groups();
        if let Some(i) = groups.get_index_of(&Id::literal(coordinate.group.as_str())) {
            return Some(RuleHit::Group(i));
        }
        if let Some(i) = groups
            .keys()
            .position(|rule| !rule.is_literal() && rule.matches(&coordinate.group))
        {
            return Some(RuleHit::Group(i));
        }

        let coordinates = self.config.ignored_coordinates();
        let literal_key = (
            Id::literal(coordinate.group.as_str()),
            Id::literal(coordinate.artifact.as_str()),
        );
        if let Some(i) = coordinates.get_index_of(&literal_key) {
            return Some(RuleHit::Coordinate(i));
        }
        coordinates
            .keys()
            .position(|(group, artifact)| {
                group.matches(&coordinate.group) && artifact.matches(&coordinate.artifact)
            })
            .map(RuleHit::Coordinate)
    }

    fn into_warnings(self, warnings: &mut Vec<String>) {
        let groups = self.config.ignored_groups();
        for i in self.unused_groups {
            if let Some((group, _)) = groups.get_index(i) {
                warnings.push(format!("Dependency ignore for {group} is unused"));
            }
        }
        let coordinates = self.config.ignored_coordinates();
        for i in self.unused_coordinates {
            if let Some(((group, artifact), _)) = coordinates.get_index(i) {
                warnings.push(format!("Dependency ignore for {group}:{artifact} is unused"));
            }
        }
    }
}

/// Walk `graph` from its root and collect the coordinates to inspect.
///
/// Project components, platform components and flat-dir modules (empty group
/// and version) are skipped but still traversed. An ignored module is not
/// collected; a transitive ignore also stops traversal below it. Every
/// component is visited at most once. A component that is neither a project
/// nor a module aborts the walk.
pub fn load_dependency_coordinates(
    graph: &DependencyGraph,
    config: &DependencyConfig,
) -> Result<DependencyResolution> {
    let mut config_warnings = Vec::new();
    let mut usage = RuleUsage::new(config, &mut config_warnings);

    let mut coordinates = BTreeSet::new();
    let mut seen = vec![false; graph.len()];
    let mut stack: Vec<(NodeIndex, usize)> = vec![(graph.root(), 1)];

    while let Some((index, depth)) = stack.pop() {
        if std::mem::replace(&mut seen[index.index()], true) {
            continue;
        }
        let component = graph.component(index);

        let mut descend = true;
        let suffix = match &component.kind {
            ComponentKind::Project { .. } => " ignoring because project dependency".to_string(),
            ComponentKind::Module { .. } if component.platform => {
                " ignoring because platform dependency".to_string()
            }
            ComponentKind::Module { coordinate }
                if coordinate.group.is_empty() && coordinate.version.is_empty() =>
            {
                " ignoring because flat-dir repository artifact has no metadata".to_string()
            }
            ComponentKind::Module { coordinate } => match usage.lookup(coordinate) {
                Some(ignored) => {
                    descend = !ignored.transitive;
                    ignore_suffix(ignored)
                }
                None => {
                    coordinates.insert(coordinate.clone());
                    String::new()
                }
            },
            ComponentKind::Other { kind } => {
                return Err(LicenseGateError::graph(
                    "walking dependency graph",
                    GraphErrorKind::UnknownComponent {
                        id: component.id.clone(),
                        kind: kind.clone(),
                    },
                ));
            }
        };

        debug!("{}{}{}", "  ".repeat(depth), component.id, suffix);

        if descend {
            for edge in component.dependencies.iter().rev() {
                match edge {
                    DependencyEdge::Resolved(child) => {
                        if !seen[child.index()] {
                            stack.push((*child, depth + 1));
                        }
                    }
                    DependencyEdge::Unresolved { requested } => {
                        debug!(
                            "{}{} skipping unresolved dependency",
                            "  ".repeat(depth + 1),
                            requested
                        );
                    }
                }
            }
        }
    }

    usage.into_warnings(&mut config_warnings);

    Ok(DependencyResolution {
        coordinates,
        config_warnings,
    })
}

fn ignore_suffix(ignored: &IgnoredData) -> String {
    let mut suffix = String::from(" ignoring");
    if ignored.transitive {
        suffix.push_str(" [transitive=true]");
    }
    if let Some(reason) = &ignored.reason {
        suffix.push_str(" because ");
        suffix.push_str(reason);
    }
    suffix
}
