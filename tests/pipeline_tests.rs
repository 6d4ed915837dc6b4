//! Pipeline and CLI integration tests.
//!
//! These tests run the full walk → resolve → normalize → validate → report
//! pipeline over the fixture graph, repository and policy.

use license_gate::cli::{CheckConfig, run_check as run_check_command};
use license_gate::config::{ViolationAction, load_config_file};
use license_gate::model::DependencyGraph;
use license_gate::pipeline::{CheckOutcome, exit_codes, run_check, write_outputs};
use license_gate::resolve::LocalRepository;
use license_gate::spdx::SpdxLicenses;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

const EXPECTED_VALIDATION: &str = r"WARNING: Dependency ignore for /org\.unused\..*/ is unused

com.custom:eula:1.0
 - Unknown license URL 'https://custom.example/eula.html' allowed because vendor EULA reviewed by legal
com.example:child:2.0
 - SPDX identifier 'MIT' allowed
com.example:lib:1.0
 - SPDX identifier 'Apache-2.0' allowed
com.gpl:tool:1.0
 - ERROR: SPDX identifier 'GPL-3.0-only' is NOT allowed
com.other:nolicense:1.0
 - Artifact declares no licenses!
 - Coordinate version is allowed because license confirmed by email
com.transitive:dep:1.0
 - SPDX identifier 'BSD-3-Clause' allowed
";

fn run_fixture() -> CheckOutcome {
    let licenses = SpdxLicenses::embedded();
    let policy = load_config_file(&fixture_path("policy.yaml"))
        .expect("policy parses")
        .into_policy(licenses)
        .expect("policy is valid");
    let json = std::fs::read_to_string(fixture_path("graph.json")).expect("graph exists");
    let graph = DependencyGraph::from_json(&json).expect("graph is valid");
    let repository = LocalRepository::new([fixture_path("repository")]);

    run_check(&graph, &repository, &policy, licenses).expect("check runs")
}

fn check_config(output_dir: &Path, action: Option<ViolationAction>) -> CheckConfig {
    CheckConfig {
        graph: fixture_path("graph.json"),
        repositories: vec![fixture_path("repository")],
        policy: Some(fixture_path("policy.yaml")),
        output_dir: output_dir.to_path_buf(),
        violation_action: action,
        url_collision: None,
    }
}

// ============================================================================
// Pipeline
// ============================================================================

mod pipeline {
    use super::*;

    #[test]
    fn fixture_outcome() {
        let outcome = run_fixture();
        assert_eq!(outcome.artifacts.len(), 6);
        assert_eq!(outcome.results.error_count(), 1);
        assert!(outcome.should_fail(ViolationAction::Fail));

        let child = outcome
            .artifacts
            .iter()
            .find(|a| a.coordinate.artifact == "child")
            .expect("child collected");
        assert_eq!(child.name.as_deref(), Some("Example Parent"));
        assert_eq!(
            child.scm.as_ref().map(|s| s.url.as_str()),
            Some("https://github.com/example/parent")
        );
    }

    #[test]
    fn reports_match_expected_text() {
        let tmp = TempDir::new().unwrap();
        write_outputs(tmp.path(), &run_fixture()).unwrap();

        let text = std::fs::read_to_string(tmp.path().join("validation.txt")).unwrap();
        assert_eq!(text, EXPECTED_VALIDATION);

        let json: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(tmp.path().join("artifacts.json")).unwrap(),
        )
        .unwrap();
        let artifacts = json.as_array().expect("array of artifacts");
        assert_eq!(artifacts.len(), 6);
        assert_eq!(artifacts[0]["groupId"], "com.custom");
        assert_eq!(
            artifacts[0]["unknownLicenses"][0]["url"],
            "https://custom.example/eula.html"
        );
        assert_eq!(artifacts[2]["spdxLicenses"][0]["identifier"], "Apache-2.0");
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_outputs(first.path(), &run_fixture()).unwrap();
        write_outputs(second.path(), &run_fixture()).unwrap();

        for name in ["artifacts.json", "validation.txt"] {
            let a = std::fs::read(first.path().join(name)).unwrap();
            let b = std::fs::read(second.path().join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs");
            assert_eq!(a.last(), Some(&b'\n'));
        }
    }
}

// ============================================================================
// Exit contract
// ============================================================================

mod exit_contract {
    use super::*;

    #[test]
    fn fail_action_exits_with_validation_failed() {
        let tmp = TempDir::new().unwrap();
        let code = run_check_command(check_config(tmp.path(), None)).unwrap();
        assert_eq!(code, exit_codes::VALIDATION_FAILED);
        assert!(tmp.path().join("validation.txt").is_file());
    }

    #[test]
    fn log_and_ignore_actions_succeed_with_same_reports() {
        let log = TempDir::new().unwrap();
        let ignore = TempDir::new().unwrap();
        assert_eq!(
            run_check_command(check_config(log.path(), Some(ViolationAction::Log))).unwrap(),
            exit_codes::SUCCESS
        );
        assert_eq!(
            run_check_command(check_config(ignore.path(), Some(ViolationAction::Ignore)))
                .unwrap(),
            exit_codes::SUCCESS
        );
        assert_eq!(
            std::fs::read(log.path().join("validation.txt")).unwrap(),
            std::fs::read(ignore.path().join("validation.txt")).unwrap()
        );
    }

    #[test]
    fn missing_graph_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = CheckConfig {
            graph: tmp.path().join("missing.json"),
            ..check_config(tmp.path(), None)
        };
        assert!(run_check_command(config).is_err());
    }
}
