//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Commit subject (first paragraph, single line)
    pub subject: String,
    /// Commit body
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Render the commit as a raw record for the commit parser.
    ///
    /// Layout is `subject\nbody\nhash\ndate\nname\nemail\n`; an empty body
    /// still occupies its line.
    pub fn to_raw_record(&self) -> String {
        let body = self.body.as_deref().unwrap_or("").trim_end();
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n",
            self.subject,
            body,
            self.hash,
            self.timestamp.to_rfc3339(),
            self.author,
            self.author_email
        )
    }
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Version carried by the tag name, once the tag prefix is stripped
    pub version: Option<semver::Version>,
}

impl TagInfo {
    /// Create a new TagInfo without version information
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            message: None,
            version: None,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Parse the version from the tag name after `prefix`
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.version = version_from_tag(&self.name, prefix);
        self
    }
}

/// Extract the semantic version from a tag name such as `v1.2.3`
pub fn version_from_tag(tag: &str, prefix: &str) -> Option<semver::Version> {
    let rest = tag.strip_prefix(prefix)?;
    semver::Version::parse(rest).ok()
}
