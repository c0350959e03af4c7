//! # Upgrade Command Implementation
//!
//! This module implements the `upgrade` subcommand, which moves one managed
//! library to a new version in every other library that directly requires it.
//!
//! ## Functionality
//!
//! - **Sync**: Clones missing library workspaces and fetches existing ones
//! - **Detection**: Reads each library's module graph with `go list`
//! - **Update**: Branches, runs `go get`, commits `go.mod`/`go.sum` and pushes
//! - **Review**: Opens a GitLab merge request per updated library and prints
//!   its URL
//!
//! With `--dry-run` the command stops after detection and lists the branches
//! it would push.

use anyhow::{Context, Result};
use clap::Args;

use go_bump::config::{self, RunConfig};
use go_bump::defaults::{self, API_TOKEN_ENV};
use go_bump::error::Error;
use go_bump::hosting::GitLabHosting;
use go_bump::output::{ConsoleProgress, OutputConfig};
use go_bump::phases::orchestrator::Orchestrator;
use go_bump::phases::{LibraryOutcome, UpdateRequest};
use go_bump::suggestions;

use crate::cli::GlobalArgs;

/// Update a dependency in every library that directly requires it
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Module path of the dependency, which must be a managed library.
    #[arg(short, long, value_name = "MODULE")]
    pub dependency: String,

    /// Version to pin, passed to `go get` as-is (e.g. v1.3.0).
    #[arg(short, long, value_name = "VERSION")]
    pub version: String,

    /// Detect dependent libraries without pushing or opening merge requests.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `upgrade` command.
pub fn execute(args: UpgradeArgs, globals: &GlobalArgs) -> Result<()> {
    let output = OutputConfig::from_env_and_flag(&globals.color);

    let workdir = globals
        .workdir
        .clone()
        .unwrap_or_else(defaults::default_workdir);
    let config_path = globals
        .config
        .clone()
        .unwrap_or_else(|| defaults::config_path(&workdir));

    println!("Config file: {}", config_path.display());
    println!(
        "Libraries directory: {}",
        defaults::libraries_dir(&workdir).display()
    );

    if !config_path.exists() {
        return Err(suggestions::config_not_found(&config_path));
    }

    let config = config::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let run_config = RunConfig::new(&workdir, config);

    let token = std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty());
    let token_set = token.is_some();

    let orchestrator = Orchestrator::new(run_config, Box::new(GitLabHosting::new(token)))
        .with_progress(Box::new(ConsoleProgress::new(output)))
        .dry_run(args.dry_run);

    let request = UpdateRequest::new(args.dependency, args.version);
    let report = orchestrator.run(&request).map_err(|e| match e {
        Error::Request { .. } => suggestions::request_failed(e, token_set),
        other => other.into(),
    })?;

    if args.dry_run {
        let planned = report
            .outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, LibraryOutcome::Planned { .. }))
            .count();
        println!(
            "Dry run: {} of {} libraries would be updated",
            planned,
            report.outcomes.len()
        );
        return Ok(());
    }

    let urls = report.urls();
    if urls.is_empty() {
        println!("No library directly requires {}", request.dependency);
    }
    for url in urls {
        println!("MR: {}", url);
    }

    Ok(())
}
