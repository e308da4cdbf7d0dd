//! Reverted-commit filtering

use std::borrow::Cow;

use tracing::debug;

use crate::types::{Commit, Revert};

/// Drop revert records and the commits they cancel.
///
/// A revert cancels a commit whose hash equals the revert's hash, or whose
/// subject equals the reverted subject. A revert that is itself cancelled
/// by another revert does not cancel anything, so reverting a revert
/// restores the original. Order is preserved. When nothing is a revert the
/// input is returned as-is.
pub fn filter_reverted_commits(commits: &[Commit]) -> Cow<'_, [Commit]> {
    if !commits.iter().any(Commit::is_revert) {
        return Cow::Borrowed(commits);
    }

    let reverts: Vec<(usize, &Revert)> = commits
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.revert.as_ref().map(|r| (i, r)))
        .collect();

    let live: Vec<&Revert> = reverts
        .iter()
        .filter(|(i, _)| {
            !reverts
                .iter()
                .any(|(j, other)| j != i && targets(other, &commits[*i]))
        })
        .map(|(_, revert)| *revert)
        .collect();

    let kept: Vec<Commit> = commits
        .iter()
        .filter(|c| !c.is_revert() && !live.iter().any(|r| targets(r, c)))
        .cloned()
        .collect();

    debug!(
        reverts = reverts.len(),
        removed = commits.len() - kept.len(),
        "filtered reverted commits"
    );
    Cow::Owned(kept)
}

fn targets(revert: &Revert, commit: &Commit) -> bool {
    (!revert.hash.is_empty() && revert.hash == commit.hash) || revert.subject == commit.subject
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CommitParser;

    fn commit(hash: &str, message: &str) -> Commit {
        let (subject, body) = message.split_once('\n').unwrap_or((message, ""));
        let raw = format!(
            "{}\n{}\n{}\n2024-01-15T10:30:00Z\nJane Doe\njane@example.com\n",
            subject, body, hash
        );
        CommitParser::new().parse(&raw).unwrap()
    }

    fn hashes(commits: &[Commit]) -> Vec<&str> {
        commits.iter().map(|c| c.hash.as_str()).collect()
    }

    #[test]
    fn test_no_reverts_borrows() {
        let commits = vec![commit("aaaa1111", "feat: a"), commit("bbbb2222", "fix: b")];
        let filtered = filter_reverted_commits(&commits);
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered.as_ref(), commits.as_slice());
    }

    #[test]
    fn test_revert_removes_target_by_hash() {
        let commits = vec![
            commit(
                "cccc3333",
                "Revert \"feat: a\"\n\nThis reverts commit aaaa1111.",
            ),
            commit("bbbb2222", "fix: b"),
            commit("aaaa1111", "feat: renamed later"),
        ];
        let filtered = filter_reverted_commits(&commits);
        assert_eq!(hashes(&filtered), vec!["bbbb2222"]);
    }

    #[test]
    fn test_revert_without_hash_matches_subject() {
        let commits = vec![
            commit("cccc3333", "Revert \"feat: a\""),
            commit("aaaa1111", "feat: a"),
            commit("bbbb2222", "feat: b"),
        ];
        let filtered = filter_reverted_commits(&commits);
        assert_eq!(hashes(&filtered), vec!["bbbb2222"]);
    }

    #[test]
    fn test_revert_of_revert_restores_original() {
        let commits = vec![
            commit(
                "cccc3333",
                "Revert \"Revert \"feat: a\"\"\n\nThis reverts commit bbbb2222.",
            ),
            commit(
                "bbbb2222",
                "Revert \"feat: a\"\n\nThis reverts commit aaaa1111.",
            ),
            commit("aaaa1111", "feat: a"),
        ];
        let filtered = filter_reverted_commits(&commits);
        assert_eq!(hashes(&filtered), vec!["aaaa1111"]);
    }

    #[test]
    fn test_orphan_revert_is_dropped() {
        let commits = vec![
            commit("cccc3333", "Revert \"feat: gone\"\n\nThis reverts commit dddd4444."),
            commit("aaaa1111", "feat: a"),
        ];
        let filtered = filter_reverted_commits(&commits);
        assert_eq!(hashes(&filtered), vec!["aaaa1111"]);
    }
}
