//! Historical license URL variants that never made it into the SPDX list.
//!
//! Projects often point at an old or mirrored copy of a license text. These
//! URLs are compared after [`canonicalize_url`], so scheme, `www.` prefix,
//! case and file extension differences all collapse onto one key.

use crate::error::{LicenseGateError, Result, SpdxErrorKind};
use std::collections::HashMap;

/// Well-known license URLs keyed by the SPDX identifier they denote.
pub const FALLBACK_URLS: &[(&str, &[&str])] = &[
    (
        "Apache-2.0",
        &[
            "http://www.apache.org/licenses/LICENSE-2.0.txt",
            "http://www.apache.org/licenses/LICENSE-2.0.html",
            "http://www.apache.org/licenses/LICENSE-2.0",
            "http://www.opensource.org/licenses/apache2.0.php",
            "https://opensource.org/license/apache-2-0",
            "https://api.github.com/licenses/apache-2.0",
        ],
    ),
    (
        "CC0-1.0",
        &[
            "http://creativecommons.org/publicdomain/zero/1.0/",
            "https://api.github.com/licenses/cc0-1.0",
        ],
    ),
    (
        "LGPL-2.1-only",
        &[
            "http://www.opensource.org/licenses/LGPL-2.1",
            "http://www.gnu.org/licenses/old-licenses/lgpl-2.1.html",
            "https://api.github.com/licenses/lgpl-2.1",
        ],
    ),
    (
        "MIT",
        &[
            "http://opensource.org/licenses/mit-license",
            "http://www.opensource.org/licenses/mit-license.php",
            "http://opensource.org/licenses/MIT",
            "https://api.github.com/licenses/mit",
        ],
    ),
    (
        "BSD-2-Clause",
        &[
            "http://www.opensource.org/licenses/bsd-license",
            "http://www.opensource.org/licenses/bsd-license.php",
            "https://api.github.com/licenses/bsd-2-clause",
        ],
    ),
    (
        "BSD-3-Clause",
        &[
            "http://opensource.org/licenses/BSD-3-Clause",
            "https://api.github.com/licenses/bsd-3-clause",
        ],
    ),
    (
        "GPL-2.0-with-classpath-exception",
        &["http://www.gnu.org/software/classpath/license.html"],
    ),
    (
        "GPL-2.0-or-later",
        &[
            "https://choosealicense.com/licenses/gpl-2.0",
            "https://opensource.org/license/gpl-2-0",
            "http://www.gnu.org/licenses/old-licenses/gpl-2.0.html",
            "https://api.github.com/licenses/gpl-2.0",
        ],
    ),
    (
        "EPL-1.0",
        &[
            "http://www.eclipse.org/org/documents/epl-v10.php",
            "https://api.github.com/licenses/epl-1.0",
        ],
    ),
    (
        "EPL-2.0",
        &[
            "http://www.eclipse.org/legal/epl-2.0/",
            "https://api.github.com/licenses/epl-2.0",
        ],
    ),
    ("ISC", &["https://opensource.org/licenses/isc-license.txt"]),
];

const STRIPPED_EXTENSIONS: &[&str] = &[".txt", ".php", ".html", ".htm"];

/// Reduce a license URL to the key used for fallback comparison.
///
/// Lower-cases the URL, drops the `http://`/`https://` scheme and a `www.`
/// host prefix, and removes one trailing `/` and one trailing file extension.
#[must_use]
pub fn canonicalize_url(url: &str) -> String {
    let lowered = url.trim().to_lowercase();
    let mut rest = lowered.as_str();
    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest = rest.strip_suffix('/').unwrap_or(rest);
    for extension in STRIPPED_EXTENSIONS {
        if let Some(stripped) = rest.strip_suffix(extension) {
            rest = stripped;
            break;
        }
    }
    rest = rest.strip_suffix('/').unwrap_or(rest);
    rest.to_string()
}

/// Canonical URL key to SPDX identifier.
#[derive(Debug, Clone, Default)]
pub struct FallbackUrls {
    by_key: HashMap<String, String>,
}

impl FallbackUrls {
    /// Build the fallback table, checking every identifier with `is_known`.
    ///
    /// Two entries that canonicalize to the same key must agree on the
    /// identifier; a conflict is reported as a duplicate.
    pub fn build(
        entries: &[(&str, &[&str])],
        is_known: impl Fn(&str) -> bool,
    ) -> Result<Self> {
        let mut by_key = HashMap::new();
        for (identifier, urls) in entries {
            if !is_known(identifier) {
                return Err(LicenseGateError::spdx(
                    "building fallback URL table",
                    SpdxErrorKind::UnknownIdentifier((*identifier).to_string()),
                ));
            }
            for url in *urls {
                let key = canonicalize_url(url);
                match by_key.get(&key) {
                    Some(existing) if existing != identifier => {
                        return Err(LicenseGateError::spdx(
                            format!("fallback URL for '{identifier}' already maps to '{existing}'"),
                            SpdxErrorKind::DuplicateFallbackUrl((*url).to_string()),
                        ));
                    }
                    Some(_) => {}
                    None => {
                        by_key.insert(key, (*identifier).to_string());
                    }
                }
            }
        }
        Ok(Self { by_key })
    }

    /// The SPDX identifier a URL falls back to, if any.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<&str> {
        self.by_key.get(&canonicalize_url(url)).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_url() {
        assert_eq!(
            canonicalize_url("http://www.apache.org/licenses/LICENSE-2.0.txt"),
            "apache.org/licenses/license-2.0"
        );
        assert_eq!(
            canonicalize_url("HTTPS://Example.com/License/"),
            "example.com/license"
        );
        assert_eq!(
            canonicalize_url("https://example.com/license.html/"),
            "example.com/license"
        );
        // Only one extension is removed.
        assert_eq!(
            canonicalize_url("https://example.com/license.txt.html"),
            "example.com/license.txt"
        );
    }

    #[test]
    fn test_default_table_lookups() {
        let table = FallbackUrls::build(FALLBACK_URLS, |_| true).unwrap();
        assert_eq!(
            table.find("http://www.apache.org/licenses/LICENSE-2.0.html"),
            Some("Apache-2.0")
        );
        assert_eq!(
            table.find("https://www.opensource.org/licenses/apache2.0.php"),
            Some("Apache-2.0")
        );
        assert_eq!(
            table.find("https://creativecommons.org/publicdomain/zero/1.0"),
            Some("CC0-1.0")
        );
        assert_eq!(
            table.find("https://choosealicense.com/licenses/gpl-2.0"),
            Some("GPL-2.0-or-later")
        );
        assert_eq!(
            table.find("https://www.eclipse.org/legal/epl-2.0"),
            Some("EPL-2.0")
        );
        assert_eq!(table.find("https://example.com/unknown"), None);
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        let err = FallbackUrls::build(&[("Nope-1.0", &["https://x"])], |id| id != "Nope-1.0")
            .unwrap_err();
        assert!(matches!(
            err,
            LicenseGateError::Spdx {
                source: SpdxErrorKind::UnknownIdentifier(_),
                ..
            }
        ));
    }

    #[test]
    fn test_conflicting_entries_are_rejected() {
        let entries: &[(&str, &[&str])] = &[
            ("MIT", &["http://example.com/license"]),
            ("ISC", &["https://www.example.com/license.txt"]),
        ];
        assert!(FallbackUrls::build(entries, |_| true).is_err());
    }
}
