//! Release command

use clap::Args;
use console::style;
use tracing::info;

use bumpkit_core::types::{ReleaseResult, ReleaseType};
use bumpkit_git::{GitRepo, VersionControl};

use crate::cli::{output, Cli, OutputFormat};
use crate::workflow::{execute_release, plan_release, PlanOptions, ReleasePlan, ReleaseSteps};

/// Bump versions, update the changelog, commit and tag
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Release type to use instead of the recommendation
    #[arg(short, long)]
    pub release_as: Option<ReleaseType>,

    /// Release a pre-release, optionally with an identifier
    #[arg(long, value_name = "ID", num_args = 0..=1, default_missing_value = "")]
    pub prerelease: Option<String>,

    /// Don't update version files
    #[arg(long)]
    pub skip_bump: bool,

    /// Don't update the changelog
    #[arg(long)]
    pub skip_changelog: bool,

    /// Don't create the release commit
    #[arg(long)]
    pub skip_commit: bool,

    /// Don't create the release tag
    #[arg(long)]
    pub skip_tag: bool,

    /// Dry run - don't make any changes
    #[arg(long)]
    pub dry_run: bool,
}

impl ReleaseCommand {
    fn steps(&self) -> ReleaseSteps {
        ReleaseSteps {
            skip_bump: self.skip_bump,
            skip_changelog: self.skip_changelog,
            skip_commit: self.skip_commit,
            skip_tag: self.skip_tag,
            dry_run: self.dry_run,
        }
    }

    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            release_as = ?self.release_as,
            prerelease = ?self.prerelease,
            dry_run = self.dry_run,
            "executing release command"
        );
        let cwd = cli.working_dir()?;
        let config = cli.load_config()?;
        let repo = GitRepo::discover(&cwd)?;

        if let Some(branch) = repo.current_branch()? {
            info!(%branch, "releasing from branch");
        }

        let options = PlanOptions {
            release_as: self.release_as,
            prerelease: self.prerelease.clone(),
        };
        let plan = plan_release(&config, &cwd, &repo, &options)?;

        if cli.is_text() && !cli.quiet {
            print_plan(&plan, self.dry_run);
        }

        let result = execute_release(&config, &cwd, &repo, &plan, self.steps())?;

        match cli.format {
            OutputFormat::Json => output::json(&result)?,
            OutputFormat::Text if !cli.quiet => print_result(&result, self),
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

fn print_plan(plan: &ReleasePlan, dry_run: bool) {
    let title = if dry_run { "Release (dry run)" } else { "Release" };
    println!("{}", output::header(title));
    println!(
        "{}",
        output::key_value(
            "version",
            &format!(
                "{} → {}",
                plan.current.version,
                output::version_style().apply_to(&plan.next_version)
            )
        )
    );
    println!("{}", output::key_value("release", &plan.release_type.to_string()));
    println!("{}", output::key_value("commits", &plan.commits.len().to_string()));
    println!("  {}", style(&plan.recommendation.reason).dim());
    println!();
}

fn print_result(result: &ReleaseResult, cmd: &ReleaseCommand) {
    let verb = if result.dry_run { "Would update" } else { "Updated" };
    for path in &result.updated_files {
        output::info(&format!(
            "{} {}",
            verb,
            output::path_style().apply_to(path.display())
        ));
    }

    if result.dry_run {
        if let Some(changelog) = &result.changelog {
            println!();
            print!("{}", changelog);
            println!();
        }
        output::warning("Dry run: no files written, nothing committed or tagged");
        return;
    }

    if !cmd.skip_tag {
        output::success(&format!(
            "Released {} as {}",
            output::version_style().apply_to(&result.new_version),
            output::tag_style().apply_to(&result.tag)
        ));
    } else {
        output::success(&format!(
            "Prepared {}",
            output::version_style().apply_to(&result.new_version)
        ));
    }
}
