//! Markdown changelog formatter

use std::fmt::Write as _;

use bumpkit_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ChangelogEntry, Commit, Reference};

/// Markdown changelog formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// Link the version heading to a compare view
    pub include_compare_link: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_compare_link: true,
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownFormatter {
    fn heading(&self, entry: &ChangelogEntry, repo_url: Option<&str>) -> String {
        let date = entry.date.format("%Y-%m-%d");
        let compare = match (
            self.include_compare_link,
            repo_url,
            &entry.previous_tag,
            &entry.current_tag,
        ) {
            (true, Some(url), Some(previous), Some(current)) => {
                Some(format!("{}/compare/{}...{}", url, previous, current))
            }
            _ => None,
        };

        match compare {
            Some(link) => format!("## [{}]({}) ({})", entry.version, link, date),
            None => format!("## {} ({})", entry.version, date),
        }
    }

    fn commit_line(&self, commit: &Commit, config: &ChangelogConfig) -> String {
        let repo_url = config.repository_url.as_deref();
        let mut line = String::from("* ");

        if let Some(scope) = commit.scope.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(line, "**{}:** ", scope);
        }
        line.push_str(&commit.title);

        if config.include_hashes {
            match repo_url {
                Some(url) => {
                    let _ = write!(
                        line,
                        " ([{}]({}/commit/{}))",
                        commit.short_hash(),
                        url,
                        commit.hash
                    );
                }
                None => {
                    let _ = write!(line, " ({})", commit.short_hash());
                }
            }
        }

        let closes: Vec<String> = commit
            .references
            .iter()
            .filter(|r| r.action.is_some())
            .map(|r| issue_link(r, repo_url))
            .collect();
        if !closes.is_empty() {
            let _ = write!(line, ", closes {}", closes.join(" "));
        }

        if config.include_authors {
            let _ = write!(line, " - {}", commit.name);
        }

        line
    }
}

/// `#12`, `owner/repo#12`, linked when the target can be resolved
fn issue_link(reference: &Reference, repo_url: Option<&str>) -> String {
    let label = match (&reference.owner, &reference.repository) {
        (Some(owner), Some(repo)) => format!(
            "{}/{}{}{}",
            owner, repo, reference.prefix, reference.issue
        ),
        _ => format!("{}{}", reference.prefix, reference.issue),
    };

    if reference.prefix != "#" {
        return label;
    }

    let url = match (&reference.owner, &reference.repository, repo_url) {
        (Some(owner), Some(repo), Some(base)) => base
            .rsplitn(3, '/')
            .nth(2)
            .map(|host| format!("{}/{}/{}/issues/{}", host, owner, repo, reference.issue)),
        (None, None, Some(base)) => Some(format!("{}/issues/{}", base, reference.issue)),
        _ => None,
    };

    match url {
        Some(url) => format!("[{}]({})", label, url),
        None => label,
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, entry, config), fields(version = %entry.version, section_count = entry.sections.len()))]
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> String {
        let mut output = self.heading(entry, config.repository_url.as_deref());
        output.push_str("\n\n");

        if !entry.breaking_changes.is_empty() {
            output.push_str("### ⚠ BREAKING CHANGES\n\n");
            for change in &entry.breaking_changes {
                output.push_str("* ");
                if let Some(scope) = change.scope.as_deref().filter(|s| !s.is_empty()) {
                    let _ = write!(output, "**{}:** ", scope);
                }
                output.push_str(&change.text);
                output.push('\n');
            }
            output.push('\n');
        }

        for section in &entry.sections {
            if section.commits.is_empty() {
                continue;
            }

            let _ = write!(output, "### {}\n\n", section.title);
            for commit in &section.commits {
                output.push_str(&self.commit_line(commit, config));
                output.push('\n');
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CommitParser;
    use crate::types::{BreakingChange, Section};
    use chrono::{TimeZone, Utc};

    fn commit(message: &str) -> Commit {
        let (subject, body) = message.split_once('\n').unwrap_or((message, ""));
        let raw = format!(
            "{}\n{}\nabc1234567890\n2024-01-15T10:30:00Z\nJane Doe\njane@example.com\n",
            subject, body
        );
        CommitParser::new().parse(&raw).unwrap()
    }

    fn entry(title: &str, commits: Vec<Commit>) -> ChangelogEntry {
        let mut entry = ChangelogEntry::new("1.0.0", Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        entry.sections.push(Section {
            title: title.to_string(),
            commits,
        });
        entry
    }

    #[test]
    fn test_format_basic() {
        let config = ChangelogConfig::default();
        let output = MarkdownFormatter::new().format(&entry("Features", vec![commit("feat: add new feature")]), &config);

        assert!(output.starts_with("## 1.0.0 (2024-01-15)\n\n"));
        assert!(output.contains("### Features\n\n* add new feature (abc1234)\n"));
    }

    #[test]
    fn test_format_with_scope() {
        let config = ChangelogConfig::default();
        let output = MarkdownFormatter::new().format(
            &entry("Bug Fixes", vec![commit("fix(parser): handle edge case")]),
            &config,
        );
        assert!(output.contains("* **parser:** handle edge case"));
    }

    #[test]
    fn test_format_breaking_changes() {
        let config = ChangelogConfig::default();
        let mut entry = entry("Features", vec![]);
        entry.breaking_changes.push(BreakingChange {
            scope: None,
            text: "remove deprecated API".to_string(),
            hash: "abc1234".to_string(),
        });

        let output = MarkdownFormatter::new().format(&entry, &config);
        assert!(output.contains("### ⚠ BREAKING CHANGES\n\n* remove deprecated API\n"));
        assert!(!output.contains("### Features"));
    }

    #[test]
    fn test_format_with_repo_url() {
        let config = ChangelogConfig {
            repository_url: Some("https://github.com/test/repo".to_string()),
            ..Default::default()
        };
        let mut entry = entry(
            "Features",
            vec![commit("feat: feature\n\nCloses #12, acme/tools#3")],
        );
        entry = entry.with_tags(Some("v0.9.0".to_string()), "v1.0.0");

        let output = MarkdownFormatter::new().format(&entry, &config);
        assert!(output.starts_with(
            "## [1.0.0](https://github.com/test/repo/compare/v0.9.0...v1.0.0) (2024-01-15)"
        ));
        assert!(output.contains("([abc1234](https://github.com/test/repo/commit/abc1234567890))"));
        assert!(output.contains(
            ", closes [#12](https://github.com/test/repo/issues/12) \
             [acme/tools#3](https://github.com/acme/tools/issues/3)"
        ));
    }
}
