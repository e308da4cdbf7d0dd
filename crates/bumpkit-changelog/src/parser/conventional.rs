//! Conventional commit parsing
//!
//! Turns a raw record into a [`Commit`]. The subject is classified in a
//! fixed order (merge, revert, conventional); the body is then scanned for
//! notes, mentions and issue references.

use std::borrow::Cow;

use tracing::{debug, instrument, warn};

use super::options::ParserOptions;
use super::record::RawRecord;
use crate::types::{is_breaking_keyword, Commit, Merge, Note, Reference, Revert};
use bumpkit_core::CommitFormatError;

/// What the subject line turned out to be
#[derive(Debug, PartialEq, Eq)]
enum SubjectKind {
    Merge(Merge),
    Revert(Revert),
    Conventional {
        commit_type: String,
        scope: Option<String>,
        breaking: bool,
        title: String,
    },
    Unrecognized,
}

/// Parser for raw commit records
#[derive(Debug, Clone, Default)]
pub struct CommitParser {
    options: ParserOptions,
}

impl CommitParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse one raw record.
    ///
    /// Fails only on a malformed trailer; a subject that is not
    /// conventional yields a commit with an empty type.
    pub fn parse(&self, raw: &str) -> Result<Commit, CommitFormatError> {
        let record = RawRecord::split(raw)?;
        let message = record.message();
        let body = self.strip_comments(&record.body);

        let kind = self.classify(record.subject, &message);
        let notes = self.notes(&body);
        let mentions = self.mentions(&body);
        let references = self.references(&body);

        let mut commit = Commit {
            raw: message,
            subject: record.subject.to_string(),
            body: record.body.clone(),
            hash: record.hash.to_string(),
            date: record.date.to_string(),
            name: record.name.to_string(),
            email: record.email.to_string(),
            commit_type: String::new(),
            scope: None,
            title: String::new(),
            is_breaking_change: notes.iter().any(|n| is_breaking_keyword(&n.title)),
            merge: None,
            revert: None,
            mentions,
            references,
            notes,
        };

        match kind {
            SubjectKind::Merge(merge) => commit.merge = Some(merge),
            SubjectKind::Revert(revert) => commit.revert = Some(revert),
            SubjectKind::Conventional {
                commit_type,
                scope,
                breaking,
                title,
            } => {
                commit.commit_type = commit_type;
                commit.scope = scope;
                commit.title = title;
                commit.is_breaking_change |= breaking;
            }
            SubjectKind::Unrecognized => {}
        }

        Ok(commit)
    }

    /// Parse many records, skipping malformed ones
    #[instrument(skip_all, fields(count = raws.len()))]
    pub fn parse_all<S: AsRef<str>>(&self, raws: &[S]) -> Vec<Commit> {
        let commits: Vec<Commit> = raws
            .iter()
            .filter_map(|raw| match self.parse(raw.as_ref()) {
                Ok(commit) => Some(commit),
                Err(e) => {
                    warn!(error = %e, "skipping malformed commit record");
                    None
                }
            })
            .collect();

        debug!(parsed = commits.len(), "parsed commit records");
        commits
    }

    fn strip_comments<'a>(&self, body: &'a str) -> Cow<'a, str> {
        match &self.options.comment_pattern {
            Some(pattern) => Cow::Owned(
                body.lines()
                    .filter(|line| !pattern.is_match(line))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            None => Cow::Borrowed(body),
        }
    }

    fn classify(&self, subject: &str, message: &str) -> SubjectKind {
        let group = |caps: &regex::Captures<'_>, name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        if let Some(caps) = self.options.merge_pattern.captures(subject) {
            return SubjectKind::Merge(Merge {
                id: group(&caps, "id"),
                source: group(&caps, "source"),
            });
        }

        if let Some(caps) = self.options.revert_pattern.captures(message) {
            return SubjectKind::Revert(Revert {
                subject: group(&caps, "subject"),
                hash: group(&caps, "hash"),
            });
        }

        if let Some(caps) = self.options.subject_pattern.captures(subject) {
            return SubjectKind::Conventional {
                commit_type: group(&caps, "type"),
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                breaking: caps.name("breaking").is_some(),
                title: group(&caps, "title"),
            };
        }

        SubjectKind::Unrecognized
    }

    /// Notes and their continuation lines.
    ///
    /// A note runs until the next note; content lines after it are
    /// appended, keeping a blank-line gap as a paragraph break.
    fn notes(&self, body: &str) -> Vec<Note> {
        let mut notes: Vec<Note> = Vec::new();
        let mut open: Option<usize> = None;
        let mut previous_blank = false;

        for line in body.lines() {
            if let Some(caps) = self.options.note_pattern.captures(line) {
                notes.push(Note {
                    title: caps["title"].to_string(),
                    text: caps
                        .name("text")
                        .map_or("", |m| m.as_str())
                        .trim()
                        .to_string(),
                });
                open = Some(notes.len() - 1);
                previous_blank = false;
                continue;
            }

            if line.trim().is_empty() {
                previous_blank = true;
                continue;
            }

            if let Some(note) = open.and_then(|i| notes.get_mut(i)) {
                if !note.text.is_empty() {
                    note.text.push_str(if previous_blank { "\n\n" } else { "\n" });
                }
                note.text.push_str(line.trim_end());
            }
            previous_blank = false;
        }

        notes
    }

    fn mentions(&self, body: &str) -> Vec<String> {
        self.options
            .mention_pattern
            .captures_iter(body)
            .filter_map(|caps| caps.name("name").map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Issue references, each tagged with the action keyword it follows.
    ///
    /// An action covers the rest of its line up to the next action, so
    /// `Closes #1, #2 fixes #3` gives `#1` and `#2` to `Closes`.
    fn references(&self, body: &str) -> Vec<Reference> {
        let mut references = Vec::new();

        for line in body.lines() {
            let actions: Vec<(usize, &str)> = self
                .options
                .action_pattern
                .captures_iter(line)
                .filter_map(|caps| caps.name("action"))
                .map(|m| (m.end(), m.as_str()))
                .collect();

            for caps in self.options.issue_pattern.captures_iter(line) {
                let Some(whole) = caps.get(0) else { continue };
                let action = actions
                    .iter()
                    .rev()
                    .find(|(end, _)| *end <= whole.start())
                    .map(|(_, action)| action.to_string());

                references.push(Reference {
                    action,
                    owner: caps.name("owner").map(|m| m.as_str().to_string()),
                    repository: caps.name("repository").map(|m| m.as_str().to_string()),
                    prefix: caps.name("prefix").map_or("", |m| m.as_str()).to_string(),
                    issue: caps.name("issue").map_or("", |m| m.as_str()).to_string(),
                });
            }
        }

        references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpkit_core::config::ParserConfig;

    const TRAILER: &str = "9b1aff905b638aa274a5fc8f88662df446d374bd\n\
                           2024-01-15T10:30:00Z\nJane Doe\njane@example.com\n";

    fn record(message: &str) -> String {
        let (subject, body) = message.split_once('\n').unwrap_or((message, ""));
        format!("{}\n{}\n{}", subject, body, TRAILER)
    }

    fn parse(message: &str) -> Commit {
        CommitParser::new().parse(&record(message)).unwrap()
    }

    #[test]
    fn test_parse_conventional() {
        let commit = parse("feat(login:form/register): add email field");
        assert_eq!(commit.commit_type, "feat");
        assert_eq!(commit.scope.as_deref(), Some("login:form/register"));
        assert_eq!(commit.title, "add email field");
        assert!(!commit.is_breaking_change);
        assert!(commit.merge.is_none());
        assert!(commit.revert.is_none());
    }

    #[test]
    fn test_empty_scope() {
        let commit = parse("fix(): trim input");
        assert_eq!(commit.scope.as_deref(), Some(""));
        assert_eq!(parse("fix: trim input").scope, None);
    }

    #[test]
    fn test_bang_marks_breaking() {
        let commit = parse("refactor(api)!: drop v1 routes");
        assert_eq!(commit.commit_type, "refactor");
        assert!(commit.is_breaking_change);
        assert!(commit.notes.is_empty());
    }

    #[test]
    fn test_non_conventional_subject() {
        let commit = parse("Update README");
        assert_eq!(commit.commit_type, "");
        assert_eq!(commit.scope, None);
        assert_eq!(commit.title, "");
        assert!(!commit.is_conventional());
    }

    #[test]
    fn test_merge_wins_over_conventional() {
        let commit = parse("Merge pull request #42 from user/feature-branch");
        let merge = commit.merge.as_ref().unwrap();
        assert_eq!(merge.id, "42");
        assert_eq!(merge.source, "user/feature-branch");
        assert_eq!(commit.commit_type, "");
        assert!(commit.revert.is_none());
    }

    #[test]
    fn test_merge_with_breaking_note() {
        let commit = parse(
            "Merge pull request #7 from user/v2\n\nBREAKING CHANGE: config keys renamed",
        );
        assert!(commit.merge.is_some());
        assert_eq!(commit.commit_type, "");
        assert!(commit.is_breaking_change);
        assert_eq!(commit.notes.len(), 1);

        let plain = parse("Merge pull request #8 from user/docs");
        assert!(!plain.is_breaking_change);
    }

    #[test]
    fn test_revert_with_hash() {
        let commit = parse(
            "Revert \"feat: add thing\"\n\nThis reverts commit 4f9d2c1a8b7e6d5c4b3a2918f7e6d5c4b3a29180.",
        );
        let revert = commit.revert.as_ref().unwrap();
        assert_eq!(revert.subject, "feat: add thing");
        assert_eq!(revert.hash, "4f9d2c1a8b7e6d5c4b3a2918f7e6d5c4b3a29180");
        assert_eq!(commit.commit_type, "");
    }

    #[test]
    fn test_revert_without_hash() {
        let commit = parse("Revert \"feat: add thing\"");
        let revert = commit.revert.unwrap();
        assert_eq!(revert.subject, "feat: add thing");
        assert_eq!(revert.hash, "");
    }

    #[test]
    fn test_breaking_note() {
        let commit = parse("feat: new api\n\nBREAKING CHANGE: the old endpoint is gone");
        assert!(commit.is_breaking_change);
        assert_eq!(
            commit.notes,
            vec![Note {
                title: "BREAKING CHANGE".to_string(),
                text: "the old endpoint is gone".to_string(),
            }]
        );
    }

    #[test]
    fn test_multi_line_note() {
        let commit = parse(
            "feat: x\n\nIntro paragraph.\n\nBREAKING CHANGE: first line\nsecond line\n\nthird paragraph",
        );
        assert_eq!(commit.notes.len(), 1);
        assert_eq!(
            commit.notes[0].text,
            "first line\nsecond line\n\nthird paragraph"
        );
    }

    #[test]
    fn test_note_text_on_following_line() {
        let commit = parse("feat: x\n\nBREAKING-CHANGE:\nconfig moved");
        assert_eq!(commit.notes[0].title, "BREAKING-CHANGE");
        assert_eq!(commit.notes[0].text, "config moved");
    }

    #[test]
    fn test_custom_note_keyword_is_not_breaking() {
        let config = ParserConfig {
            note_keywords: Some(vec!["BREAKING CHANGE".to_string(), "DEPRECATED".to_string()]),
            ..Default::default()
        };
        let parser = CommitParser::with_options(ParserOptions::from_config(&config).unwrap());
        let commit = parser
            .parse(&record("feat: x\n\nDEPRECATED: old flag"))
            .unwrap();
        assert_eq!(commit.notes[0].title, "DEPRECATED");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_mentions() {
        let commit = parse("fix: x\n\nThanks @alice and @bob-smith, cc @alice.\nmail me@example.com");
        assert_eq!(commit.mentions, vec!["alice", "bob-smith", "alice"]);
    }

    #[test]
    fn test_references_with_actions() {
        let commit = parse("fix: x\n\nCloses #1, #2 fixes #3\nsee #4");
        let summary: Vec<(Option<&str>, &str)> = commit
            .references
            .iter()
            .map(|r| (r.action.as_deref(), r.issue.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("Closes"), "1"),
                (Some("Closes"), "2"),
                (Some("fixes"), "3"),
                (None, "4"),
            ]
        );
    }

    #[test]
    fn test_cross_repository_reference() {
        let commit = parse("fix: x\n\nResolves octo/widgets#77");
        let reference = &commit.references[0];
        assert_eq!(reference.owner.as_deref(), Some("octo"));
        assert_eq!(reference.repository.as_deref(), Some("widgets"));
        assert_eq!(reference.prefix, "#");
        assert_eq!(reference.issue, "77");
        assert_eq!(reference.action.as_deref(), Some("Resolves"));
    }

    #[test]
    fn test_comment_lines_are_ignored() {
        let config = ParserConfig {
            comment_char: Some("#".to_string()),
            ..Default::default()
        };
        let parser = CommitParser::with_options(ParserOptions::from_config(&config).unwrap());
        let raw = record("feat: x\n\n# @ignored BREAKING CHANGE: no\n@kept");
        let commit = parser.parse(&raw).unwrap();
        assert_eq!(commit.mentions, vec!["kept"]);
        assert!(commit.notes.is_empty());
        assert!(commit.body.contains("# @ignored"));
        assert_eq!(parser.parse(&raw).unwrap(), commit);
    }

    #[test]
    fn test_parse_all_skips_malformed() {
        let raws = vec![
            record("feat: one"),
            "broken\nrecord\n".to_string(),
            record("fix: two"),
        ];
        let commits = CommitParser::new().parse_all(&raws);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].title, "two");
    }
}
