//! Release commit operations

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use bumpkit_core::error::GitError;

impl GitRepo {
    /// Stage `paths` and commit them on HEAD with `message`.
    ///
    /// Paths may be absolute or relative to the work tree. Returns the new
    /// commit hash.
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            let relative = self.relative_to_workdir(path)?;
            index.add_path(&relative)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let sig = self.repo.signature()?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        info!(hash = %oid, "created release commit");
        Ok(oid.to_string())
    }

    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| GitError::OutsideWorkdir(path.to_path_buf()))?;
        let workdir = workdir.canonicalize().map_err(|_| GitError::OutsideWorkdir(path.to_path_buf()))?;
        let absolute = path
            .canonicalize()
            .map_err(|_| GitError::OutsideWorkdir(path.to_path_buf()))?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::OutsideWorkdir(path.to_path_buf()))
    }
}
