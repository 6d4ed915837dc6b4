//! Identifier and URL indexes over an SPDX license list document.

use super::fallback::{FALLBACK_URLS, FallbackUrls};
use crate::error::{LicenseGateError, Result, SpdxErrorKind};
use crate::model::{RawLicense, SpdxLicense};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static EMBEDDED: LazyLock<SpdxLicenses> = LazyLock::new(|| {
    SpdxLicenses::parse_json(include_str!("licenses.json"))
        .expect("embedded license list is valid")
});

/// How to pick records when one URL is registered by several licenses.
///
/// Deprecated identifiers and their replacements commonly share a URL
/// (`GPL-2.0` and `GPL-2.0-only` for example). Current identifiers are
/// registered before deprecated ones, each group in identifier order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum UrlCollisionPolicy {
    /// The record registered first: the lowest current identifier, else the
    /// lowest deprecated one
    #[default]
    FirstRegistered,
    /// The record with the shortest identifier; ties keep registration order
    ShortestIdentifier,
    /// Every candidate record
    All,
}

impl UrlCollisionPolicy {
    /// Apply the policy to the candidates of one URL.
    #[must_use]
    pub fn select(self, candidates: &[SpdxLicense]) -> Vec<SpdxLicense> {
        match self {
            Self::FirstRegistered => candidates.iter().take(1).cloned().collect(),
            Self::ShortestIdentifier => candidates
                .iter()
                .enumerate()
                .min_by_key(|(i, license)| (license.identifier.len(), *i))
                .map(|(_, license)| license.clone())
                .into_iter()
                .collect(),
            Self::All => candidates.to_vec(),
        }
    }
}

impl std::fmt::Display for UrlCollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstRegistered => write!(f, "first-registered"),
            Self::ShortestIdentifier => write!(f, "shortest-identifier"),
            Self::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseListJson {
    #[serde(default)]
    license_list_version: Option<String>,
    licenses: Vec<LicenseJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseJson {
    license_id: String,
    name: String,
    reference: String,
    #[serde(default)]
    see_also: Vec<String>,
    #[serde(default)]
    is_deprecated_license_id: bool,
}

impl LicenseJson {
    /// First see-also URL, else the SPDX reference page, upgraded to https.
    fn target_url(&self) -> String {
        let first = self.see_also.first().unwrap_or(&self.reference);
        upgrade_to_https(first)
    }

    fn to_record(&self) -> SpdxLicense {
        SpdxLicense::new(&self.license_id, &self.name, self.target_url())
    }
}

fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// The SPDX license table.
#[derive(Debug, Clone)]
pub struct SpdxLicenses {
    list_version: Option<String>,
    by_identifier: BTreeMap<String, SpdxLicense>,
    by_url: HashMap<String, Vec<SpdxLicense>>,
    fallback: FallbackUrls,
}

impl SpdxLicenses {
    /// The table compiled into the binary.
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// Parse an SPDX `licenses.json` document with the default fallback URLs.
    pub fn parse_json(json: &str) -> Result<Self> {
        Self::parse_json_with_fallbacks(json, FALLBACK_URLS)
    }

    /// Parse an SPDX `licenses.json` document with custom fallback URLs.
    pub fn parse_json_with_fallbacks(json: &str, fallbacks: &[(&str, &[&str])]) -> Result<Self> {
        let mut document: LicenseListJson = serde_json::from_str(json).map_err(|e| {
            LicenseGateError::spdx(
                "parsing license list",
                SpdxErrorKind::InvalidJson(e.to_string()),
            )
        })?;
        document.licenses.sort_by(|a, b| {
            (a.is_deprecated_license_id, &a.license_id)
                .cmp(&(b.is_deprecated_license_id, &b.license_id))
        });

        let mut by_identifier = BTreeMap::new();
        let mut by_url: HashMap<String, Vec<SpdxLicense>> = HashMap::new();
        for license in &document.licenses {
            let record = license.to_record();
            register(&mut by_url, &license.reference, &record);
            for other in &license.see_also {
                if other.starts_with("http://") {
                    register(&mut by_url, &upgrade_to_https(other), &record);
                }
                register(&mut by_url, other, &record);
            }
            by_identifier.insert(license.license_id.clone(), record);
        }

        let fallback = FallbackUrls::build(fallbacks, |id| by_identifier.contains_key(id))?;

        tracing::debug!(
            licenses = by_identifier.len(),
            urls = by_url.len(),
            fallbacks = fallback.len(),
            "loaded SPDX license table"
        );

        Ok(Self {
            list_version: document.license_list_version,
            by_identifier,
            by_url,
            fallback,
        })
    }

    /// Version of the license list the table was built from
    #[must_use]
    pub fn list_version(&self) -> Option<&str> {
        self.list_version.as_deref()
    }

    /// Number of licenses in the document
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Iterate over records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &SpdxLicense> {
        self.by_identifier.values()
    }

    /// Look up a record by SPDX identifier.
    ///
    /// Identifiers missing from the document are resolved against the full
    /// SPDX list shipped with the `spdx` crate, pointing at the SPDX
    /// reference page.
    #[must_use]
    pub fn find_by_identifier(&self, identifier: &str) -> Option<SpdxLicense> {
        if let Some(record) = self.by_identifier.get(identifier) {
            return Some(record.clone());
        }
        spdx::license_id(identifier).map(|id| {
            SpdxLicense::new(
                id.name,
                id.full_name,
                format!("https://spdx.org/licenses/{}.html", id.name),
            )
        })
    }

    /// Whether `identifier` names a known SPDX license
    #[must_use]
    pub fn is_known_identifier(&self, identifier: &str) -> bool {
        self.by_identifier.contains_key(identifier) || spdx::license_id(identifier).is_some()
    }

    /// Exact URL lookup; candidates are in registration order.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> &[SpdxLicense] {
        self.by_url.get(url).map_or(&[], Vec::as_slice)
    }

    /// Canonicalized lookup against the historical fallback URLs.
    #[must_use]
    pub fn find_fallback(&self, url: &str) -> Option<SpdxLicense> {
        self.fallback
            .find(url)
            .and_then(|identifier| self.by_identifier.get(identifier))
            .cloned()
    }

    /// Classify one declared license.
    ///
    /// A URL is looked up exactly, then through the fallback table. The name
    /// is only tried as an identifier when no URL is declared. An empty
    /// result means the license is unknown.
    #[must_use]
    pub fn find_license(
        &self,
        license: &RawLicense,
        collisions: UrlCollisionPolicy,
    ) -> Vec<SpdxLicense> {
        match (&license.url, &license.name) {
            (Some(url), _) => {
                let exact = self.find_by_url(url);
                if exact.is_empty() {
                    self.find_fallback(url).into_iter().collect()
                } else {
                    collisions.select(exact)
                }
            }
            (None, Some(name)) => self.find_by_identifier(name).into_iter().collect(),
            (None, None) => Vec::new(),
        }
    }
}

fn register(by_url: &mut HashMap<String, Vec<SpdxLicense>>, url: &str, record: &SpdxLicense) {
    let records = by_url.entry(url.to_string()).or_default();
    if !records.contains(record) {
        records.push(record.clone());
    }
}
