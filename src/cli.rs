//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// go-bump - Update a Go module across a fleet of libraries
#[derive(Parser, Debug)]
#[command(name = "go-bump")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Working directory holding config.yaml and the library clones.
    ///
    /// Defaults to `~/.go-bump`.
    #[arg(long, global = true, value_name = "DIR", env = "GOBUMP_WORKDIR")]
    workdir: Option<PathBuf>,

    /// Path to the configuration file.
    ///
    /// Defaults to `config.yaml` inside the working directory.
    #[arg(long, global = true, value_name = "FILE", env = "GOBUMP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update a dependency in every library that directly requires it
    Upgrade(commands::upgrade::UpgradeArgs),
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub color: String,
    pub workdir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let globals = GlobalArgs {
            color: self.color,
            workdir: self.workdir,
            config: self.config,
        };

        match self.command {
            Commands::Upgrade(args) => commands::upgrade::execute(args, &globals),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
