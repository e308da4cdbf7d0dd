//! Parse command

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use bumpkit_changelog::{filter_reverted_commits, Commit, CommitParser, ParserOptions};
use bumpkit_core::workflow::tag_prefix;
use bumpkit_git::{GitRepo, VersionControl};

use crate::cli::{output, Cli};

/// Separator between records read from a file or stdin
const RECORD_SEPARATOR: char = '\0';

/// Parse raw commit records and print them as JSON
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Read NUL-separated raw records from a file (`-` for stdin)
    /// instead of the repository history
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Start after this tag (defaults to the latest release tag)
    #[arg(long, conflicts_with_all = ["input", "all"])]
    pub from: Option<String>,

    /// Parse the whole history
    #[arg(long, conflicts_with = "input")]
    pub all: bool,

    /// Keep reverts and the commits they undo
    #[arg(long)]
    pub include_reverted: bool,
}

impl ParseCommand {
    /// Execute the parse command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(input = ?self.input, from = ?self.from, "executing parse command");
        let config = cli.load_config()?;
        let parser = CommitParser::with_options(ParserOptions::from_config(&config.parser)?);

        let raws = match &self.input {
            Some(path) => split_records(&read_input(path)?),
            None => {
                let repo = GitRepo::discover(&cli.working_dir()?)?;
                let since = match (&self.from, self.all) {
                    (Some(tag), _) => Some(tag.clone()),
                    (None, true) => None,
                    (None, false) => repo
                        .latest_version_tag(tag_prefix(&config))?
                        .map(|tag| tag.name),
                };
                repo.raw_commits_since(since.as_deref())?
            }
        };

        let commits = parser.parse_all(&raws);
        let commits: Cow<'_, [Commit]> = if self.include_reverted {
            Cow::Borrowed(commits.as_slice())
        } else {
            filter_reverted_commits(&commits)
        };

        output::json(&commits)
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn split_records(content: &str) -> Vec<String> {
    content
        .split(RECORD_SEPARATOR)
        .map(|record| record.trim_start_matches('\n'))
        .filter(|record| !record.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_records() {
        let content = "feat: a\n\nabc1234\n2024-01-01\nJane\njane@example.com\n\0\n\
                       fix: b\n\nabc1235\n2024-01-02\nJane\njane@example.com\n\0";
        let records = split_records(content);

        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("feat: a\n"));
        assert!(records[1].starts_with("fix: b\n"));
    }

    #[test]
    fn test_split_records_empty() {
        assert!(split_records("\n\0\n").is_empty());
    }
}
