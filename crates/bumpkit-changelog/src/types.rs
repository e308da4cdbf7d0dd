//! Changelog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit record after parsing
///
/// Exactly one of three shapes holds: a conventional commit (non-empty
/// `commit_type`), a merge (`merge` set) or a revert (`revert` set). A record
/// matching none of them has an empty type and neither field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Subject and body joined, with blank-line runs collapsed
    pub raw: String,
    /// First line of the message
    pub subject: String,
    /// Message body as supplied
    pub body: String,
    /// Commit hash
    pub hash: String,
    /// Committer date, verbatim
    pub date: String,
    /// Author name
    pub name: String,
    /// Author email
    pub email: String,
    /// Conventional type (`feat`, `fix`, ...); empty when not conventional
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Scope; `Some("")` for `type(): ...`
    pub scope: Option<String>,
    /// Subject text after `type(scope): `
    pub title: String,
    /// Bang marker or a breaking-change note
    pub is_breaking_change: bool,
    /// Set for merge commits
    pub merge: Option<Merge>,
    /// Set for revert commits
    pub revert: Option<Revert>,
    /// `@name` mentions in order of appearance
    pub mentions: Vec<String>,
    /// Issue references in order of appearance
    pub references: Vec<Reference>,
    /// Notes such as `BREAKING CHANGE: ...`
    pub notes: Vec<Note>,
}

impl Commit {
    /// Whether this is a conventional commit
    pub fn is_conventional(&self) -> bool {
        !self.commit_type.is_empty()
    }

    /// Whether this is a revert commit
    pub fn is_revert(&self) -> bool {
        self.revert.is_some()
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Breaking-change notes
    pub fn breaking_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| n.is_breaking())
    }
}

/// Merge information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Pull request number
    pub id: String,
    /// Source branch
    pub source: String,
}

/// Revert information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Subject of the reverted commit
    pub subject: String,
    /// Hash of the reverted commit; empty when the message omits it
    pub hash: String,
}

/// Reference to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Action keyword such as `Closes`, as written
    pub action: Option<String>,
    /// Repository owner for `owner/repo#N`
    pub owner: Option<String>,
    /// Repository name for `owner/repo#N`
    pub repository: Option<String>,
    /// Issue prefix as written (`#`, `gh-`)
    pub prefix: String,
    /// Issue identifier
    pub issue: String,
}

/// Note extracted from the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

impl Note {
    /// Whether the note announces a breaking change
    pub fn is_breaking(&self) -> bool {
        is_breaking_keyword(&self.title)
    }
}

pub(crate) fn is_breaking_keyword(title: &str) -> bool {
    title == "BREAKING CHANGE" || title == "BREAKING-CHANGE"
}

/// A changelog entry for one release
#[derive(Debug, Clone)]
pub struct ChangelogEntry {
    /// Version being released
    pub version: String,
    /// Release date
    pub date: DateTime<Utc>,
    /// Tag of the previous release, used for compare links
    pub previous_tag: Option<String>,
    /// Tag of this release
    pub current_tag: Option<String>,
    /// Breaking changes, listed ahead of the sections
    pub breaking_changes: Vec<BreakingChange>,
    /// Sections in configured order
    pub sections: Vec<Section>,
}

impl ChangelogEntry {
    /// Create an empty entry
    pub fn new(version: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            date,
            previous_tag: None,
            current_tag: None,
            breaking_changes: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Set the compare range
    pub fn with_tags(mut self, previous: Option<String>, current: impl Into<String>) -> Self {
        self.previous_tag = previous;
        self.current_tag = Some(current.into());
        self
    }

    /// Check if the entry lists nothing
    pub fn is_empty(&self) -> bool {
        self.breaking_changes.is_empty() && self.sections.iter().all(|s| s.commits.is_empty())
    }
}

/// A section in the changelog
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub commits: Vec<Commit>,
}

/// A breaking change line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakingChange {
    pub scope: Option<String>,
    pub text: String,
    pub hash: String,
}
