//! Work tree state checked before a release

use git2::{Status, StatusOptions};
use tracing::debug;

use crate::repository::{GitRepo, Result};

/// Changes that would leak into, or be lost by, a release commit
const DIRTY: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE)
    .union(Status::WT_MODIFIED)
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE)
    .union(Status::CONFLICTED);

impl GitRepo {
    /// Whether tracked files match HEAD. Untracked files don't count.
    pub fn is_clean(&self) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let dirty = statuses
            .iter()
            .filter(|entry| entry.status().intersects(DIRTY))
            .inspect(|entry| debug!(path = entry.path().unwrap_or("?"), "uncommitted change"))
            .count();
        Ok(dirty == 0)
    }

    /// Branch HEAD points at; `None` when detached or unborn
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(head
            .is_branch()
            .then(|| head.shorthand().map(str::to_string))
            .flatten())
    }
}
