//! Property-based tests for id matching and license URL canonicalization.
//!
//! Ensures the matchers handle arbitrary input without panicking, and that
//! the subsumption and canonicalization invariants hold across random inputs.

use license_gate::matching::Id;
use license_gate::model::RawLicense;
use license_gate::spdx::{SpdxLicenses, UrlCollisionPolicy, canonicalize_url};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn literal_matches_only_itself(a in "[a-z.]{1,20}", b in "[a-z.]{1,20}") {
        let id = Id::literal(a.clone());
        prop_assert!(id.matches(&a));
        prop_assert_eq!(id.matches(&b), a == b);
    }

    #[test]
    fn escaped_regex_behaves_like_literal(s in "[a-zA-Z0-9.\\-_+*?()]{1,30}", candidate in "\\PC{0,30}") {
        let literal = Id::literal(s.clone());
        let regex = Id::regex(regex::escape(&s)).expect("escaped pattern compiles");

        prop_assert!(literal.subsumes(&regex));
        prop_assert!(regex.subsumes(&literal));
        prop_assert_eq!(literal.matches(&candidate), regex.matches(&candidate));
    }

    #[test]
    fn regex_is_anchored(group in "[a-z]{1,10}", extra in "[a-z]{1,10}") {
        let id = Id::regex(regex::escape(&group)).unwrap();
        let longer = format!("{group}.{extra}");
        let prefixed = format!("{extra}.{group}");
        prop_assert!(!id.matches(&longer));
        prop_assert!(!id.matches(&prefixed));
    }

    #[test]
    fn subsumption_implies_matching(pattern in "[a-z]{1,6}(\\.\\*)?", candidate in "[a-z.]{1,12}") {
        let wide = Id::regex(pattern).unwrap();
        let narrow = Id::literal(candidate.clone());
        if wide.subsumes(&narrow) {
            prop_assert!(wide.matches(&candidate));
        }
    }

    #[test]
    fn canonicalize_is_idempotent(
        scheme in "(https?://)?",
        www in "(www\\.)?",
        path in "[a-z0-9\\-]{1,20}(/[a-z0-9\\-]{1,10}){0,3}/?",
        extension in "(\\.txt|\\.html|\\.php)?",
    ) {
        let once = canonicalize_url(&format!("{scheme}{www}{path}{extension}"));
        prop_assert_eq!(canonicalize_url(&once), once.clone());
        prop_assert!(!once.ends_with('/'));
    }

    #[test]
    fn canonicalize_ignores_scheme_and_case(path in "[a-z0-9/\\-]{1,40}") {
        let plain = canonicalize_url(&format!("https://example.org/{path}"));
        prop_assert_eq!(canonicalize_url(&format!("HTTP://WWW.EXAMPLE.ORG/{}", path.to_uppercase())), plain);
    }

    #[test]
    fn find_license_never_panics(name in proptest::option::of("\\PC{0,40}"), url in proptest::option::of("\\PC{0,80}")) {
        let license = RawLicense { name, url };
        for policy in [UrlCollisionPolicy::FirstRegistered, UrlCollisionPolicy::ShortestIdentifier, UrlCollisionPolicy::All] {
            let found = SpdxLicenses::embedded().find_license(&license, policy);
            if policy != UrlCollisionPolicy::All {
                prop_assert!(found.len() <= 1);
            }
        }
    }
}
