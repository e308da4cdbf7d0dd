//! Release type recommendation

use serde::Serialize;
use tracing::debug;

use bumpkit_core::ReleaseType;

use crate::types::Commit;

/// Recommended release for a set of commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub release_type: ReleaseType,
    /// Commits carrying a breaking change or a note
    pub breaking: usize,
    /// Feature commits
    pub features: usize,
    /// Human-readable summary of the counts
    pub reason: String,
}

/// Recommend a release type.
///
/// Any breaking change or note forces a major release; otherwise a feature
/// gives a minor one. Everything else, including no commits at all, is a
/// patch.
pub fn recommend_release(commits: &[Commit]) -> Recommendation {
    let mut release_type = ReleaseType::Patch;
    let mut breaking = 0;
    let mut features = 0;

    for commit in commits {
        if commit.is_breaking_change || !commit.notes.is_empty() {
            breaking += 1;
            release_type = ReleaseType::Major;
        } else if matches!(commit.commit_type.as_str(), "feat" | "feature") {
            features += 1;
            release_type = release_type.max(ReleaseType::Minor);
        }
    }

    let reason = format!(
        "There {} {} BREAKING CHANGE{} and {} feature{}",
        if breaking == 1 { "is" } else { "are" },
        breaking,
        if breaking == 1 { "" } else { "S" },
        features,
        if features == 1 { "" } else { "s" },
    );

    debug!(%release_type, breaking, features, "recommended release");
    Recommendation {
        release_type,
        breaking,
        features,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CommitParser;

    fn commits(messages: &[&str]) -> Vec<Commit> {
        let parser = CommitParser::new();
        messages
            .iter()
            .map(|m| {
                let (subject, body) = m.split_once('\n').unwrap_or((m, ""));
                let raw = format!(
                    "{}\n{}\nabc1234\n2024-01-15T10:30:00Z\nJane Doe\njane@example.com\n",
                    subject, body
                );
                parser.parse(&raw).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_is_patch() {
        let rec = recommend_release(&[]);
        assert_eq!(rec.release_type, ReleaseType::Patch);
        assert_eq!(rec.reason, "There are 0 BREAKING CHANGES and 0 features");
    }

    #[test]
    fn test_fixes_only_is_patch() {
        let rec = recommend_release(&commits(&["fix: a", "docs: b"]));
        assert_eq!(rec.release_type, ReleaseType::Patch);
    }

    #[test]
    fn test_feature_is_minor() {
        let rec = recommend_release(&commits(&["fix: a", "feat: b", "feature: c"]));
        assert_eq!(rec.release_type, ReleaseType::Minor);
        assert_eq!(rec.features, 2);
    }

    #[test]
    fn test_breaking_is_major() {
        let rec = recommend_release(&commits(&[
            "feat: a",
            "fix: b\n\nBREAKING CHANGE: config renamed",
        ]));
        assert_eq!(rec.release_type, ReleaseType::Major);
        assert_eq!(rec.reason, "There is 1 BREAKING CHANGE and 1 feature");
    }

    #[test]
    fn test_breaking_feature_counts_once() {
        let rec = recommend_release(&commits(&["feat!: a"]));
        assert_eq!(rec.release_type, ReleaseType::Major);
        assert_eq!(rec.breaking, 1);
        assert_eq!(rec.features, 0);
    }
}
