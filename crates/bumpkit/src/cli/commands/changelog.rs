//! Changelog command

use clap::Args;
use tracing::info;

use bumpkit_changelog::prepend_changelog;
use bumpkit_core::types::ReleaseType;
use bumpkit_git::GitRepo;

use crate::cli::{output, Cli, OutputFormat};
use crate::workflow::{plan_release, render_changelog, PlanOptions};

/// Preview or write the changelog entry for the next release
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Force a specific release type for the entry heading
    #[arg(short, long)]
    pub release_as: Option<ReleaseType>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release_as = ?self.release_as, write = self.write, "executing changelog command");
        let cwd = cli.working_dir()?;
        let config = cli.load_config()?;
        let repo = GitRepo::discover(&cwd)?;

        let options = PlanOptions {
            release_as: self.release_as,
            prerelease: None,
        };
        let plan = plan_release(&config, &cwd, &repo, &options)?;
        let text = render_changelog(&config, &plan);

        if self.write {
            let path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));
            prepend_changelog(&path, &config.changelog.header, &text)?;

            if !cli.quiet {
                output::success(&format!(
                    "Wrote changelog for {} to {}",
                    output::version_style().apply_to(&plan.next_version),
                    output::path_style().apply_to(path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "version": plan.next_version,
                "commits": plan.commits.len(),
                "changelog": text,
            }))?,
            OutputFormat::Text => print!("{}", text),
        }

        Ok(())
    }
}
