//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bumpkit_core::config::{load_config_or_default, Config};
use commands::{ChangelogCommand, InitCommand, ParseCommand, ReleaseCommand, VersionCommand};

/// bumpkit - Conventional-commit release bookkeeping
#[derive(Debug, Parser)]
#[command(name = "bumpkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init(InitCommand),

    /// Show the current and next version
    Version(VersionCommand),

    /// Preview or write the changelog entry for the next release
    Changelog(ChangelogCommand),

    /// Bump versions, update the changelog, commit and tag
    Release(ReleaseCommand),

    /// Parse raw commit records and print them as JSON
    Parse(ParseCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.execute(self),
            Commands::Version(cmd) => cmd.execute(self),
            Commands::Changelog(cmd) => cmd.execute(self),
            Commands::Release(cmd) => cmd.execute(self),
            Commands::Parse(cmd) => cmd.execute(self),
        }
    }

    /// Directory the command operates on
    pub fn working_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    /// Load configuration for the working directory
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let dir = self.working_dir()?;
        let (config, path) = load_config_or_default(&dir)?;
        match path {
            Some(path) => tracing::debug!(path = %path.display(), "using config file"),
            None => tracing::debug!("no config file, using defaults"),
        }
        Ok(config)
    }

    /// Whether text output is wanted
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}
