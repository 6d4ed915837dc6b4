//! Check command handler.
//!
//! Implements the `check` subcommand: validate the licenses of every
//! dependency in a resolved graph against a policy.

use crate::config::{PolicyFile, ViolationAction, load_config_file, load_or_default};
use crate::model::DependencyGraph;
use crate::pipeline::{self, exit_codes, log_results, write_outputs};
use crate::resolve::LocalRepository;
use crate::spdx::{SpdxLicenses, UrlCollisionPolicy};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Check command configuration
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Graph document (JSON)
    pub graph: PathBuf,
    /// Maven2 layout directories searched for POMs, in order
    pub repositories: Vec<PathBuf>,
    /// Explicit policy file; discovered when absent
    pub policy: Option<PathBuf>,
    /// Directory receiving `artifacts.json` and `validation.txt`
    pub output_dir: PathBuf,
    /// Overrides the policy's violation action
    pub violation_action: Option<ViolationAction>,
    /// Overrides the policy's URL collision policy
    pub url_collision: Option<UrlCollisionPolicy>,
}

/// Run the check command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_check(config: CheckConfig) -> Result<i32> {
    let mut policy_file = load_policy_file(&config)?;
    if let Some(action) = config.violation_action {
        policy_file.violation_action = action;
    }
    if let Some(collisions) = config.url_collision {
        policy_file.url_collision = collisions;
    }

    let licenses = SpdxLicenses::embedded();
    let policy = policy_file
        .into_policy(licenses)
        .context("invalid license policy")?;

    let json = std::fs::read_to_string(&config.graph)
        .with_context(|| format!("failed to read graph {}", config.graph.display()))?;
    let graph = DependencyGraph::from_json(&json)
        .with_context(|| format!("failed to load graph {}", config.graph.display()))?;

    if config.repositories.is_empty() {
        warn!("No repositories given; every dependency will report no licenses");
    }
    let repository = LocalRepository::new(&config.repositories);

    let outcome = pipeline::run_check(&graph, &repository, &policy, licenses)?;
    log_results(&outcome.results, policy.violation_action);
    write_outputs(&config.output_dir, &outcome)?;

    let errors = outcome.results.error_count();
    if outcome.should_fail(policy.violation_action) {
        info!(
            "{errors} license violation(s), see {}",
            config.output_dir.join("validation.txt").display()
        );
        return Ok(exit_codes::VALIDATION_FAILED);
    }
    if errors > 0 {
        info!(
            "{errors} license violation(s) tolerated by violation action '{}'",
            policy.violation_action
        );
    }
    Ok(exit_codes::SUCCESS)
}

fn load_policy_file(config: &CheckConfig) -> Result<PolicyFile> {
    if let Some(path) = &config.policy {
        let policy = load_config_file(path)
            .with_context(|| format!("failed to load policy {}", path.display()))?;
        info!("Using policy {}", path.display());
        return Ok(policy);
    }

    let (policy, loaded_from) =
        load_or_default(None).context("failed to load discovered policy")?;
    match loaded_from {
        Some(path) => info!("Using policy {}", path.display()),
        None => warn!("No policy file found; nothing is allowed"),
    }
    Ok(policy)
}
