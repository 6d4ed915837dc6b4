//! Lookup command handler.
//!
//! Classifies a single license declaration the same way the check does.

use crate::model::{RawLicense, SpdxLicense};
use crate::spdx::{SpdxLicenses, UrlCollisionPolicy};
use anyhow::{Result, bail};
use std::fmt::Write as _;

/// Run the lookup command and print the classification to stdout.
pub fn run_lookup(
    url: Option<String>,
    name: Option<String>,
    collisions: UrlCollisionPolicy,
) -> Result<()> {
    if url.is_none() && name.is_none() {
        bail!("Provide a license URL (--url) or name (--name) to look up");
    }
    let license = RawLicense { name, url };
    print!("{}", describe(&license, SpdxLicenses::embedded(), collisions));
    Ok(())
}

fn describe(license: &RawLicense, licenses: &SpdxLicenses, collisions: UrlCollisionPolicy) -> String {
    let matched = licenses.find_license(license, collisions);
    let mut out = String::new();
    if matched.is_empty() {
        let _ = writeln!(out, "Unknown license: {license}");
        return out;
    }
    for SpdxLicense {
        identifier,
        name,
        url,
    } in &matched
    {
        let _ = writeln!(out, "{identifier}\t{name}\t{url}");
    }
    out
}
