//! Release workflow
//!
//! Planning reads the repository and version files and decides the next
//! version; execution writes version files and the changelog, then commits
//! and tags. Both go through [`VersionControl`] so they can run against an
//! in-memory repository in tests.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument};

use bumpkit_adapters::VersionFileRegistry;
use bumpkit_changelog::{
    filter_reverted_commits, prepend_changelog, recommend_release, ChangelogGenerator, Commit,
    CommitParser, ParserOptions, Recommendation,
};
use bumpkit_core::config::Config;
use bumpkit_core::workflow::{format_commit_message, format_tag, format_tag_message, tag_prefix};
use bumpkit_core::{ReleaseResult, ReleaseType};
use bumpkit_git::{TagInfo, VersionControl};
use bumpkit_strategies::{SemVerStrategy, VersionStrategy};

/// Version used when nothing records one yet
pub const INITIAL_VERSION: &str = "0.0.0";

/// Where the current version was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    BumpFile(PathBuf),
    Tag(String),
    Initial,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BumpFile(path) => write!(f, "{}", path.display()),
            Self::Tag(name) => write!(f, "tag {}", name),
            Self::Initial => write!(f, "initial version"),
        }
    }
}

/// Current version and its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentVersion {
    pub version: String,
    pub source: VersionSource,
}

/// Current version: first readable bump file, then the latest release
/// tag, then [`INITIAL_VERSION`]
pub fn current_version(config: &Config, root: &Path, latest_tag: Option<&TagInfo>) -> CurrentVersion {
    let registry = VersionFileRegistry::new();

    for file in &config.bump_files {
        let path = root.join(&file.path);
        match registry
            .for_file(file)
            .and_then(|handler| handler.read_version(&path))
        {
            Ok(version) => {
                return CurrentVersion {
                    version,
                    source: VersionSource::BumpFile(file.path.clone()),
                }
            }
            Err(e) => debug!(path = %path.display(), error = %e, "bump file not readable"),
        }
    }

    if let Some(tag) = latest_tag {
        if let Some(version) = &tag.version {
            return CurrentVersion {
                version: version.to_string(),
                source: VersionSource::Tag(tag.name.clone()),
            };
        }
    }

    CurrentVersion {
        version: INITIAL_VERSION.to_string(),
        source: VersionSource::Initial,
    }
}

/// Parse commits since `since` (all history when `None`) and drop
/// reverted work
#[instrument(skip(config, vcs))]
pub fn release_commits(
    config: &Config,
    vcs: &dyn VersionControl,
    since: Option<&str>,
) -> anyhow::Result<Vec<Commit>> {
    let parser = CommitParser::with_options(ParserOptions::from_config(&config.parser)?);
    let raws = vcs.raw_commits_since(since)?;
    let commits = parser.parse_all(&raws);

    let kept = match filter_reverted_commits(&commits) {
        Cow::Owned(kept) => Some(kept),
        Cow::Borrowed(_) => None,
    };

    let commits = kept.unwrap_or(commits);
    debug!(count = commits.len(), "release commits collected");
    Ok(commits)
}

/// Choices that shape the next version
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Release type to use instead of the recommendation
    pub release_as: Option<ReleaseType>,
    /// Pre-release identifier; empty for the configured default
    pub prerelease: Option<String>,
}

/// Everything decided before any file is touched
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
    pub current: CurrentVersion,
    pub previous_tag: Option<String>,
    pub commits: Vec<Commit>,
    pub recommendation: Recommendation,
    pub release_type: ReleaseType,
    pub next_version: String,
}

/// Work out the next release
#[instrument(skip_all)]
pub fn plan_release(
    config: &Config,
    root: &Path,
    vcs: &dyn VersionControl,
    options: &PlanOptions,
) -> anyhow::Result<ReleasePlan> {
    let latest = vcs.latest_version_tag(tag_prefix(config))?;
    let current = current_version(config, root, latest.as_ref());
    let previous_tag = latest.map(|t| t.name);

    let commits = release_commits(config, vcs, previous_tag.as_deref())?;
    let recommendation = recommend_release(&commits);
    let release_type = options.release_as.unwrap_or(recommendation.release_type);

    let mut strategy = SemVerStrategy::new();
    if let Some(identifier) = &config.versioning.prerelease_identifier {
        strategy = strategy.with_default_prerelease(identifier.as_str());
    }

    let parsed = strategy
        .parse(&current.version)
        .with_context(|| format!("current version from {} is not semver", current.source))?;
    let next = match options.prerelease.as_deref() {
        Some(identifier) => strategy.bump_prerelease(
            &parsed,
            release_type.into(),
            Some(identifier).filter(|id| !id.is_empty()),
        )?,
        None => strategy.bump(&parsed, release_type.into())?,
    };
    let next_version = strategy.format(&next);

    info!(
        current = %current.version,
        next = %next_version,
        %release_type,
        commits = commits.len(),
        "release planned"
    );

    Ok(ReleasePlan {
        current,
        previous_tag,
        commits,
        recommendation,
        release_type,
        next_version,
    })
}

/// Steps of a release that may be skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseSteps {
    pub skip_bump: bool,
    pub skip_changelog: bool,
    pub skip_commit: bool,
    pub skip_tag: bool,
    /// Compute everything, write nothing
    pub dry_run: bool,
}

/// Render the changelog entry for a plan
pub fn render_changelog(config: &Config, plan: &ReleasePlan) -> String {
    let generator = ChangelogGenerator::new(config.changelog.clone());
    let entry = generator
        .generate(&plan.next_version, Utc::now(), &plan.commits)
        .with_tags(
            plan.previous_tag.clone(),
            format_tag(config, &plan.next_version),
        );
    generator.format(&entry)
}

/// Carry out a planned release
#[instrument(skip_all, fields(version = %plan.next_version, dry_run = steps.dry_run))]
pub fn execute_release(
    config: &Config,
    root: &Path,
    vcs: &dyn VersionControl,
    plan: &ReleasePlan,
    steps: ReleaseSteps,
) -> anyhow::Result<ReleaseResult> {
    let version = plan.next_version.as_str();
    let tag = format_tag(config, version);
    let writes = !steps.dry_run;

    if writes && config.git.require_clean && !steps.skip_commit && !vcs.is_clean()? {
        bail!("working tree has uncommitted changes; commit or stash them first");
    }

    let mut result = ReleaseResult::new(&plan.current.version, version)
        .with_release_type(plan.release_type)
        .with_tag(&tag)
        .with_dry_run(steps.dry_run);
    let mut touched: Vec<PathBuf> = Vec::new();

    if !steps.skip_bump {
        let registry = VersionFileRegistry::new();
        for file in &config.bump_files {
            let path = root.join(&file.path);
            let handler = registry.for_file(file)?;
            if writes {
                handler
                    .write_version(&path, version)
                    .with_context(|| format!("failed to update {}", path.display()))?;
            }
            touched.push(path.clone());
            result = result.add_updated_file(path);
        }
    }

    if config.changelog.enabled && !steps.skip_changelog {
        let text = render_changelog(config, plan);
        let path = root.join(&config.changelog.file);
        if writes {
            prepend_changelog(&path, &config.changelog.header, &text)?;
        }
        touched.push(path);
        result = result.with_changelog(text);
    }

    if writes && !steps.skip_commit && !touched.is_empty() {
        let message = format_commit_message(config, version);
        let hash = vcs.commit_files(&touched, &message)?;
        info!(%hash, "release commit created");
    }

    if writes && !steps.skip_tag {
        vcs.create_tag(&tag, format_tag_message(config, version).as_deref())?;
    }

    Ok(result)
}
