//! SPDX license table.
//!
//! Built once from an SPDX `licenses.json` document. Records are indexed by
//! identifier and by every URL they declare, and a table of historical URL
//! variants catches licenses that point at an outdated copy of the text.
//!
//! ```
//! use license_gate::model::RawLicense;
//! use license_gate::spdx::{SpdxLicenses, UrlCollisionPolicy};
//!
//! let table = SpdxLicenses::embedded();
//! let found = table.find_license(
//!     &RawLicense::from_url("http://www.apache.org/licenses/LICENSE-2.0.txt"),
//!     UrlCollisionPolicy::default(),
//! );
//! assert_eq!(found[0].identifier, "Apache-2.0");
//! ```

mod fallback;
mod table;

pub use fallback::{FALLBACK_URLS, FallbackUrls, canonicalize_url};
pub use table::{SpdxLicenses, UrlCollisionPolicy};
