//! POM resolution tests.
//!
//! Parent-chain merging over the fixture Maven2 repository and over
//! in-memory POM documents.

use license_gate::error::{LicenseGateError, PomErrorKind};
use license_gate::model::{Coordinate, RawLicense};
use license_gate::resolve::{InMemoryRepository, LocalRepository, PomResolver, load_pom_info};
use std::path::Path;

const REPOSITORY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/repository");

fn pom(parent: Option<&str>, licenses: &str, scm: &str) -> String {
    let parent = parent
        .map(|p| {
            let parts: Vec<&str> = p.split(':').collect();
            format!(
                "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>",
                parts[0], parts[1], parts[2]
            )
        })
        .unwrap_or_default();
    format!("<project>{parent}<licenses>{licenses}</licenses>{scm}</project>")
}

fn coordinate(s: &str) -> Coordinate {
    s.parse().expect("valid coordinate")
}

#[test]
fn fixture_child_inherits_from_parent() {
    let repository = LocalRepository::new([Path::new(REPOSITORY_DIR)]);
    let child = coordinate("com.example:child:2.0");
    let infos = load_pom_info([&child], &repository).unwrap();

    let info = &infos[&child];
    assert_eq!(info.name.as_deref(), Some("Example Parent"));
    assert_eq!(
        info.licenses.iter().cloned().collect::<Vec<_>>(),
        vec![RawLicense::new(
            Some("MIT License"),
            Some("https://opensource.org/licenses/MIT")
        )]
    );
    assert_eq!(
        info.scm_url.as_deref(),
        Some("https://github.com/example/parent")
    );
}

#[test]
fn fixture_missing_pom_resolves_empty() {
    let repository = LocalRepository::new([Path::new(REPOSITORY_DIR)]);
    let missing = coordinate("com.other:nolicense:1.0");
    let infos = load_pom_info([&missing], &repository).unwrap();

    assert!(infos[&missing].licenses.is_empty());
    assert!(infos[&missing].name.is_none());
}

#[test]
fn three_level_chain_takes_nearest_licenses() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(
            coordinate("g:root:1"),
            &pom(None, "<license><name>Root</name></license>", ""),
        )
        .unwrap();
    repository
        .insert_pom(
            coordinate("g:middle:1"),
            &pom(
                Some("g:root:1"),
                "<license><name>Middle</name></license>",
                "",
            ),
        )
        .unwrap();
    repository
        .insert_pom(coordinate("g:leaf:1"), &pom(Some("g:middle:1"), "", ""))
        .unwrap();

    let leaf = coordinate("g:leaf:1");
    let infos = load_pom_info([&leaf], &repository).unwrap();
    assert_eq!(
        infos[&leaf].licenses.iter().cloned().collect::<Vec<_>>(),
        vec![RawLicense::from_name("Middle")]
    );
}

#[test]
fn child_licenses_replace_parent_licenses() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(
            coordinate("g:parent:1"),
            &pom(None, "<license><name>Parent</name></license>", ""),
        )
        .unwrap();
    repository
        .insert_pom(
            coordinate("g:child:1"),
            &pom(
                Some("g:parent:1"),
                "<license><name>A</name></license><license><name>B</name></license>",
                "",
            ),
        )
        .unwrap();

    let child = coordinate("g:child:1");
    let infos = load_pom_info([&child], &repository).unwrap();
    assert_eq!(
        infos[&child].licenses.iter().cloned().collect::<Vec<_>>(),
        vec![RawLicense::from_name("A"), RawLicense::from_name("B")]
    );
}

#[test]
fn scm_opt_out_strips_artifact_suffix_from_parent_url() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(
            coordinate("g:parent:1"),
            &pom(
                None,
                "",
                r#"<scm child.scm.url.inherit.append.path="false"><url>https://scm.example/repo/child</url></scm>"#,
            ),
        )
        .unwrap();
    repository
        .insert_pom(
            coordinate("g:child:1"),
            &pom(
                Some("g:parent:1"),
                "",
                "<scm><url>https://scm.example/other</url></scm>",
            ),
        )
        .unwrap();

    let child = coordinate("g:child:1");
    let infos = load_pom_info([&child], &repository).unwrap();
    assert_eq!(
        infos[&child].scm_url.as_deref(),
        Some("https://scm.example/repo")
    );
}

#[test]
fn scm_opt_in_keeps_child_url() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(
            coordinate("g:parent:1"),
            &pom(
                None,
                "",
                r#"<scm child.scm.url.inherit.append.path="true"><url>https://scm.example/repo</url></scm>"#,
            ),
        )
        .unwrap();
    repository
        .insert_pom(
            coordinate("g:child:1"),
            &pom(
                Some("g:parent:1"),
                "",
                "<scm><url>https://scm.example/repo/child</url></scm>",
            ),
        )
        .unwrap();

    let child = coordinate("g:child:1");
    let infos = load_pom_info([&child], &repository).unwrap();
    assert_eq!(
        infos[&child].scm_url.as_deref(),
        Some("https://scm.example/repo/child")
    );
}

#[test]
fn cyclic_parent_chain_is_fatal() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(coordinate("g:a:1"), &pom(Some("g:b:1"), "", ""))
        .unwrap();
    repository
        .insert_pom(coordinate("g:b:1"), &pom(Some("g:a:1"), "", ""))
        .unwrap();

    let mut resolver = PomResolver::new(&repository);
    let err = resolver.resolve(&coordinate("g:a:1")).unwrap_err();
    match err {
        LicenseGateError::Pom {
            source: PomErrorKind::CyclicParent(path),
            ..
        } => assert_eq!(path, "g:a:1 -> g:b:1 -> g:a:1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unavailable_parent_is_treated_as_absent() {
    let mut repository = InMemoryRepository::new();
    repository
        .insert_pom(
            coordinate("g:child:1"),
            &pom(
                Some("g:gone:1"),
                "",
                "<scm><url>https://scm.example/repo/child</url></scm>",
            ),
        )
        .unwrap();

    let child = coordinate("g:child:1");
    let infos = load_pom_info([&child], &repository).unwrap();
    assert!(infos[&child].licenses.is_empty());
    assert_eq!(
        infos[&child].scm_url.as_deref(),
        Some("https://scm.example/repo/child")
    );
}
