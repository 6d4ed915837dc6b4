//! license-gate: dependency license auditing
//!
//! Validates the licenses declared by every dependency of a resolved graph
//! against an allow-list policy.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use license_gate::{
    cli::{self, CheckConfig},
    config::ViolationAction,
    pipeline::exit_codes,
    spdx::UrlCollisionPolicy,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "license-gate")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(about = "Dependency license auditing for resolved dependency graphs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  All dependencies passed (or the violation action tolerates failures)
    1  License violations found and the violation action is 'fail'
    3  Error occurred

EXAMPLES:
    # Check a graph against the discovered policy
    license-gate check --graph build/graph.json --repository ~/.m2/repository

    # Report violations without failing the build
    license-gate check --graph graph.json --repository repo --violation-action log

    # How would a POM license URL be classified?
    license-gate lookup --url https://www.apache.org/licenses/LICENSE-2.0.txt")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Resolved dependency graph (JSON)
    #[arg(short, long)]
    graph: PathBuf,

    /// Maven2 layout repository searched for POM files. Can be specified multiple times.
    #[arg(short, long = "repository", value_name = "DIR")]
    repositories: Vec<PathBuf>,

    /// Path to the policy file (discovered when omitted)
    #[arg(short, long, env = "LICENSE_GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for artifacts.json and validation.txt
    #[arg(short, long, default_value = "build/license-gate")]
    output_dir: PathBuf,

    /// Override the policy's violation action
    #[arg(long, value_enum)]
    violation_action: Option<ViolationAction>,

    /// Override how shared license URLs map to SPDX records
    #[arg(long, value_enum)]
    url_collision: Option<UrlCollisionPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the licenses of every dependency in a graph
    Check(CheckArgs),

    /// Classify one license declaration against the SPDX table
    Lookup {
        /// License URL as written in a POM
        #[arg(long)]
        url: Option<String>,

        /// License name as written in a POM
        #[arg(long)]
        name: Option<String>,

        /// How shared license URLs map to SPDX records
        #[arg(long, value_enum, default_value_t)]
        url_collision: UrlCollisionPolicy,
    },

    /// Generate JSON Schema for the policy file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an example .license-gate.yaml
    Init {
        /// Print to stdout instead of writing to the current directory
        #[arg(long)]
        stdout: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check(args) => cli::run_check(CheckConfig {
            graph: args.graph,
            repositories: args.repositories,
            policy: args.config,
            output_dir: args.output_dir,
            violation_action: args.violation_action,
            url_collision: args.url_collision,
        }),

        Commands::Lookup {
            url,
            name,
            url_collision,
        } => {
            cli::run_lookup(url, name, url_collision)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Schema { output } => {
            let schema = license_gate::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Init { stdout } => {
            let content = license_gate::config::generate_example_config();
            if stdout {
                print!("{content}");
                return Ok(exit_codes::SUCCESS);
            }
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".license-gate.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "license-gate", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
