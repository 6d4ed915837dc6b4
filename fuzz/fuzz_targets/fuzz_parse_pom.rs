#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the POM reader.
///
/// Feeds arbitrary UTF-8 strings to `parse_pom`, which must reject malformed
/// XML with an error rather than a panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = license_gate::resolve::parse_pom(s);
    }
});
