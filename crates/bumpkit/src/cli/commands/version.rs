//! Version command

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use bumpkit_core::workflow::tag_prefix;
use bumpkit_core::types::ReleaseType;
use bumpkit_git::{GitRepo, VersionControl};

use crate::cli::{output, Cli, OutputFormat};
use crate::workflow::{current_version, plan_release, CurrentVersion, PlanOptions};

/// Show the current version and the recommended next version
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Force a specific release type
    #[arg(short, long)]
    pub release_as: Option<ReleaseType>,

    /// Compute a pre-release, optionally with an identifier
    #[arg(long, value_name = "ID", num_args = 0..=1, default_missing_value = "")]
    pub prerelease: Option<String>,

    /// Show current version only
    #[arg(long)]
    pub current: bool,
}

#[derive(Serialize)]
struct VersionReport<'a> {
    current: &'a str,
    next: &'a str,
    release_type: ReleaseType,
    reason: &'a str,
    commits: usize,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release_as = ?self.release_as, current = self.current, "executing version command");
        let cwd = cli.working_dir()?;
        let config = cli.load_config()?;
        let repo = GitRepo::discover(&cwd)?;

        if self.current {
            let latest = repo.latest_version_tag(tag_prefix(&config))?;
            let current = current_version(&config, &cwd, latest.as_ref());
            return self.output_current(&current, cli);
        }

        let options = PlanOptions {
            release_as: self.release_as,
            prerelease: self.prerelease.clone(),
        };
        let plan = plan_release(&config, &cwd, &repo, &options)?;

        let report = VersionReport {
            current: &plan.current.version,
            next: &plan.next_version,
            release_type: plan.release_type,
            reason: &plan.recommendation.reason,
            commits: plan.commits.len(),
        };

        match cli.format {
            OutputFormat::Json => output::json(&report)?,
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", report.next);
                    return Ok(());
                }
                println!("{}", output::header("Version"));
                println!(
                    "{}",
                    output::key_value(
                        "current",
                        &format!(
                            "{} ({})",
                            output::version_style().apply_to(report.current),
                            plan.current.source
                        )
                    )
                );
                println!(
                    "{}",
                    output::key_value(
                        "next",
                        &output::version_style().apply_to(report.next).to_string()
                    )
                );
                println!(
                    "{}",
                    output::key_value("release", &report.release_type.to_string())
                );
                println!("{}", output::key_value("commits", &report.commits.to_string()));
                println!("  {}", style(report.reason).dim());
            }
        }

        Ok(())
    }

    fn output_current(&self, current: &CurrentVersion, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => output::json(current)?,
            OutputFormat::Text => println!("{}", current.version),
        }
        Ok(())
    }
}
