//! Version control capability used by the release workflow

use std::path::PathBuf;

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

/// The repository operations a release needs.
///
/// `GitRepo` is the production implementation; the workflow only depends on
/// this trait so it can run against an in-memory double.
pub trait VersionControl {
    /// Highest semver tag whose name starts with `prefix`
    fn latest_version_tag(&self, prefix: &str) -> Result<Option<TagInfo>>;

    /// Raw commit records since `tag` (all history when `None`), newest first
    fn raw_commits_since(&self, tag: Option<&str>) -> Result<Vec<String>>;

    /// Stage and commit `paths`, returning the new commit hash
    fn commit_files(&self, paths: &[PathBuf], message: &str) -> Result<String>;

    /// Tag HEAD; annotated when `message` is set
    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo>;

    /// Whether tracked files have uncommitted changes
    fn is_clean(&self) -> Result<bool>;

    /// Checked-out branch; `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;
}

impl VersionControl for GitRepo {
    fn latest_version_tag(&self, prefix: &str) -> Result<Option<TagInfo>> {
        self.find_latest_tag(prefix)
    }

    fn raw_commits_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        Ok(self
            .commits_since_tag(tag)?
            .iter()
            .map(|c| c.to_raw_record())
            .collect())
    }

    fn commit_files(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        self.commit_paths(paths, message)
    }

    fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        GitRepo::create_tag(self, name, message)
    }

    fn is_clean(&self) -> Result<bool> {
        GitRepo::is_clean(self)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        GitRepo::current_branch(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn repo_with_commit(message: &str) -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        let sig = Signature::now("Test", "test@example.com").unwrap();
        std::fs::write(temp.path().join("a.txt"), "a").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.txt")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_raw_commits_layout() {
        let (_temp, repo) = repo_with_commit("feat: first\n\nCloses #1\n");
        let vcs: &dyn VersionControl = &repo;

        let raws = vcs.raw_commits_since(None).unwrap();
        assert_eq!(raws.len(), 1);

        let lines: Vec<&str> = raws[0].trim_end_matches('\n').split('\n').collect();
        assert_eq!(lines[0], "feat: first");
        assert_eq!(lines[1], "Closes #1");
        assert_eq!(lines[lines.len() - 2], "Test");
        assert_eq!(lines[lines.len() - 1], "test@example.com");
    }

    #[test]
    fn test_tag_through_trait() {
        let (_temp, repo) = repo_with_commit("chore: init");
        let vcs: &dyn VersionControl = &repo;

        vcs.create_tag("v0.1.0", None).unwrap();
        let latest = vcs.latest_version_tag("v").unwrap().unwrap();
        assert_eq!(latest.name, "v0.1.0");
        assert!(vcs.is_clean().unwrap());
        assert!(vcs.current_branch().unwrap().is_some());
    }
}
