#![no_main]
use libfuzzer_sys::fuzz_target;
use license_gate::config::{PolicyFile, Validatable};
use license_gate::spdx::SpdxLicenses;

/// Fuzz policy parsing, validation and conversion.
///
/// Any YAML that deserializes into a `PolicyFile` is validated and turned
/// into a `Policy`; invalid regexes and unknown identifiers must surface as
/// errors.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(file) = serde_yaml_ng::from_str::<PolicyFile>(s) {
            let _ = file.validate();
            let _ = file.into_policy(SpdxLicenses::embedded());
        }
    }
});
