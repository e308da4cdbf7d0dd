//! Changelog generation

use bumpkit_core::config::ChangelogConfig;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::types::{BreakingChange, ChangelogEntry, Commit, Section};

/// Changelog generator
pub struct ChangelogGenerator {
    formatter: Box<dyn ChangelogFormatter>,
    config: ChangelogConfig,
}

impl ChangelogGenerator {
    /// Create a new generator with the markdown formatter
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            formatter: Box::new(MarkdownFormatter::new()),
            config,
        }
    }

    /// Build an entry from parsed commits.
    ///
    /// Commits are grouped into the sections configured for their type, in
    /// configuration order. Hidden and unknown types are left out of the
    /// sections, but their breaking changes are still listed.
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, version: &str, date: DateTime<Utc>, commits: &[Commit]) -> ChangelogEntry {
        info!(version, commit_count = commits.len(), "generating changelog entry");
        let mut entry = ChangelogEntry::new(version, date);

        for commit in commits {
            entry.breaking_changes.extend(breaking_changes(commit));
            if !commit.is_conventional() {
                continue;
            }

            let Some(type_config) = self.config.type_config(&commit.commit_type.to_lowercase())
            else {
                continue;
            };
            if type_config.hidden {
                continue;
            }

            match entry
                .sections
                .iter_mut()
                .find(|s| s.title == type_config.section)
            {
                Some(section) => section.commits.push(commit.clone()),
                None => entry.sections.push(Section {
                    title: type_config.section.clone(),
                    commits: vec![commit.clone()],
                }),
            }
        }

        entry.sections.sort_by_key(|s| self.section_rank(&s.title));

        debug!(
            section_count = entry.sections.len(),
            breaking_count = entry.breaking_changes.len(),
            "changelog sections built"
        );
        entry
    }

    /// Format a changelog entry to string
    pub fn format(&self, entry: &ChangelogEntry) -> String {
        self.formatter.format(entry, &self.config)
    }

    fn section_rank(&self, title: &str) -> usize {
        self.config
            .types
            .iter()
            .position(|t| t.section == title)
            .unwrap_or(usize::MAX)
    }
}

fn breaking_changes(commit: &Commit) -> Vec<BreakingChange> {
    let mut changes: Vec<BreakingChange> = commit
        .breaking_notes()
        .map(|note| BreakingChange {
            scope: commit.scope.clone(),
            text: note.text.clone(),
            hash: commit.hash.clone(),
        })
        .collect();

    if changes.is_empty() && commit.is_breaking_change {
        changes.push(BreakingChange {
            scope: commit.scope.clone(),
            text: commit.title.clone(),
            hash: commit.hash.clone(),
        });
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CommitParser;
    use chrono::TimeZone;

    fn commits(messages: &[&str]) -> Vec<Commit> {
        let parser = CommitParser::new();
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let (subject, body) = m.split_once('\n').unwrap_or((m, ""));
                let raw = format!(
                    "{}\n{}\n{:07x}\n2024-01-15T10:30:00Z\nJane Doe\njane@example.com\n",
                    subject,
                    body,
                    0xabc0000 + i
                );
                parser.parse(&raw).unwrap()
            })
            .collect()
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sections_follow_config_order() {
        let generator = ChangelogGenerator::new(ChangelogConfig::default());
        let entry = generator.generate(
            "1.1.0",
            date(),
            &commits(&["fix: b", "chore: deps", "feat: a", "feature: c", "Update README"]),
        );

        let titles: Vec<&str> = entry.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Features", "Bug Fixes"]);
        assert_eq!(entry.sections[0].commits.len(), 2);
    }

    #[test]
    fn test_breaking_changes_from_notes_and_bang() {
        let generator = ChangelogGenerator::new(ChangelogConfig::default());
        let entry = generator.generate(
            "2.0.0",
            date(),
            &commits(&[
                "feat(api)!: drop v1",
                "refactor: x\n\nBREAKING CHANGE: config moved",
            ]),
        );

        let texts: Vec<&str> = entry
            .breaking_changes
            .iter()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(texts, vec!["drop v1", "config moved"]);
        assert_eq!(entry.breaking_changes[0].scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_hidden_only_is_empty() {
        let generator = ChangelogGenerator::new(ChangelogConfig::default());
        let entry = generator.generate("1.0.1", date(), &commits(&["chore: deps", "ci: cache"]));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_format_changelog() {
        let generator = ChangelogGenerator::new(ChangelogConfig::default());
        let entry = generator.generate("1.0.0", date(), &commits(&["feat: add feature"]));
        let formatted = generator.format(&entry);
        assert!(formatted.contains("1.0.0"));
        assert!(formatted.contains("### Features"));
    }
}
