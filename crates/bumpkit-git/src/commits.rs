//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get commits reachable from HEAD but not from `since`, newest first.
    ///
    /// With `since = None` the whole history of HEAD is returned.
    pub fn commits_since_oid(&self, since: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(since) = since {
            revwalk.hide(since)?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }

    /// Get commits since a tag, newest first
    #[instrument(skip(self))]
    pub fn commits_since_tag(&self, tag_name: Option<&str>) -> Result<Vec<CommitInfo>> {
        let since = match tag_name {
            Some(name) => {
                let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
                Some(reference.peel_to_commit()?.id())
            }
            None => None,
        };

        let commits = self.commits_since_oid(since)?;
        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let info = CommitInfo::new(
        commit.id().to_string(),
        commit.summary().unwrap_or("(no message)"),
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    );

    match commit.body() {
        Some(body) => info.with_body(body),
        None => info,
    }
}
