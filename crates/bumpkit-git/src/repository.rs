//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use bumpkit_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path (the work tree for non-bare repositories)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the repository is bare
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the HEAD commit, `None` on an unborn branch
    pub(crate) fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_open_repo() {
        let (_temp, repo) = init_repo();
        assert!(!repo.is_bare());
        assert!(repo.head_commit().unwrap().is_none());
    }

    #[test]
    fn test_discover_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // Canonicalize both paths to handle macOS /var -> /private/var symlink
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::open(temp.path());
        assert!(result.is_err());
    }
}
