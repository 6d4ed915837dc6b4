//! POM inheritance resolution.
//!
//! Merges each artifact's raw POM model with its parent chain. The child's
//! own value wins whenever present; parents only fill in what the child
//! leaves empty. SCM URLs get special treatment because Maven appends the
//! child's artifact id to an inherited URL unless the parent opts out.

use crate::error::{LicenseGateError, PomErrorKind, Result};
use crate::model::{Coordinate, PomInfo, RawLicense};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// The `<scm>` element of a POM as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScm {
    pub url: Option<String>,
    /// The `child.scm.url.inherit.append.path` attribute, if set
    pub child_url_inherit_append_path: Option<bool>,
}

/// One POM document before inheritance is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawModel {
    pub name: Option<String>,
    pub licenses: Vec<RawLicense>,
    pub scm: Option<RawScm>,
    pub parent: Option<Coordinate>,
}

impl RawModel {
    fn scm_url(&self) -> Option<&str> {
        self.scm.as_ref().and_then(|scm| scm.url.as_deref())
    }

    fn append_path(&self) -> Option<bool> {
        self.scm
            .as_ref()
            .and_then(|scm| scm.child_url_inherit_append_path)
    }
}

/// Supplies raw POM models by coordinate.
///
/// Returning `None` means the POM is unavailable; the artifact then resolves
/// to an empty [`PomInfo`]. Implementations must be side-effect free because
/// a coordinate may be requested more than once.
pub trait RawModelSource {
    fn raw_model(&self, coordinate: &Coordinate) -> Option<RawModel>;
}

impl<F> RawModelSource for F
where
    F: Fn(&Coordinate) -> Option<RawModel>,
{
    fn raw_model(&self, coordinate: &Coordinate) -> Option<RawModel> {
        self(coordinate)
    }
}

#[derive(Debug, Clone)]
struct Resolved {
    info: PomInfo,
    /// This model's own opt-in/opt-out flag, consulted by its children
    append_path: Option<bool>,
}

/// Resolves [`PomInfo`] for coordinates, memoizing every model in a chain.
pub struct PomResolver<'s, S: RawModelSource + ?Sized> {
    source: &'s S,
    cache: HashMap<Coordinate, Option<Resolved>>,
}

impl<'s, S: RawModelSource + ?Sized> PomResolver<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Resolve one coordinate. A missing POM yields [`PomInfo::empty`].
    pub fn resolve(&mut self, coordinate: &Coordinate) -> Result<PomInfo> {
        Ok(self
            .resolve_entry(coordinate)?
            .map_or_else(PomInfo::empty, |resolved| resolved.info.clone()))
    }

    fn resolve_entry(&mut self, coordinate: &Coordinate) -> Result<Option<&Resolved>> {
        // Collect the unresolved part of the parent chain, child first.
        let mut chain: Vec<(Coordinate, Option<RawModel>)> = Vec::new();
        let mut visiting = HashSet::new();
        let mut next = Some(coordinate.clone());
        while let Some(current) = next {
            if self.cache.contains_key(&current) {
                break;
            }
            if !visiting.insert(current.clone()) {
                let mut path: Vec<String> = chain.iter().map(|(c, _)| c.to_string()).collect();
                path.push(current.to_string());
                return Err(LicenseGateError::pom(
                    format!("resolving {coordinate}"),
                    PomErrorKind::CyclicParent(path.join(" -> ")),
                ));
            }
            let model = self.source.raw_model(&current);
            if model.is_none() {
                debug!("no POM available for {current}");
            }
            next = model.as_ref().and_then(|m| m.parent.clone());
            chain.push((current, model));
        }

        // Merge from the top-most ancestor down.
        for (current, model) in chain.into_iter().rev() {
            let resolved = model.map(|model| {
                let parent = model
                    .parent
                    .as_ref()
                    .and_then(|parent| self.cache.get(parent))
                    .and_then(Option::as_ref);
                merge(&current, &model, parent)
            });
            self.cache.insert(current, resolved);
        }

        Ok(self.cache.get(coordinate).and_then(Option::as_ref))
    }
}

fn merge(coordinate: &Coordinate, model: &RawModel, parent: Option<&Resolved>) -> Resolved {
    let own_url = model.scm_url();
    let scm_url = match parent {
        None => own_url.map(str::to_string),
        Some(parent) => {
            let suffix = format!("/{}", coordinate.artifact);
            let strip = |url: &str| url.strip_suffix(suffix.as_str()).unwrap_or(url).to_string();
            let parent_url = parent.info.scm_url.as_deref();
            match parent.append_path {
                // Maven appended /artifactId to an inherited URL; undo it.
                None => own_url.map(strip).or_else(|| parent_url.map(str::to_string)),
                Some(false) => parent_url
                    .map(strip)
                    .or_else(|| own_url.map(str::to_string)),
                Some(true) => own_url.or(parent_url).map(str::to_string),
            }
        }
    };

    let name = model
        .name
        .clone()
        .or_else(|| parent.and_then(|p| p.info.name.clone()));

    let licenses = match parent {
        Some(parent) if model.licenses.is_empty() => parent.info.licenses.clone(),
        _ => model.licenses.iter().cloned().collect(),
    };

    Resolved {
        info: PomInfo {
            name,
            licenses,
            scm_url,
        },
        append_path: model.append_path(),
    }
}

/// Resolve POM metadata for every coordinate.
///
/// Fails only on a cyclic parent chain; unavailable POMs produce empty info.
pub fn load_pom_info<'c, S>(
    coordinates: impl IntoIterator<Item = &'c Coordinate>,
    source: &S,
) -> Result<BTreeMap<Coordinate, PomInfo>>
where
    S: RawModelSource + ?Sized,
{
    let mut resolver = PomResolver::new(source);
    let mut infos = BTreeMap::new();
    for coordinate in coordinates {
        let info = resolver.resolve(coordinate)?;
        infos.insert(coordinate.clone(), info);
    }
    Ok(infos)
}
