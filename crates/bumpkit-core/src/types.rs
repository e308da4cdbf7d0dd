//! Core types for bumpkit

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Type of release being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Patch version bump (bug fixes)
    Patch,
    /// Minor version bump (new features)
    Minor,
    /// Major version bump (breaking changes)
    Major,
}

impl ReleaseType {
    /// Returns the string representation of the release type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReleaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(format!("Unknown release type: {}", s)),
        }
    }
}

/// Result of a release operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResult {
    /// Previous version
    pub previous_version: String,
    /// New version
    pub new_version: String,
    /// Release type that was applied
    pub release_type: ReleaseType,
    /// Tag that was (or would be) created
    pub tag: String,
    /// Version files that were updated
    pub updated_files: Vec<PathBuf>,
    /// Changelog content generated
    pub changelog: Option<String>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ReleaseResult {
    /// Create a new release result
    pub fn new(previous_version: impl Into<String>, new_version: impl Into<String>) -> Self {
        let new_version = new_version.into();
        let tag = format!("v{}", new_version);

        Self {
            previous_version: previous_version.into(),
            new_version,
            release_type: ReleaseType::Patch,
            tag,
            updated_files: Vec::new(),
            changelog: None,
            dry_run: false,
        }
    }

    /// Set the release type
    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = release_type;
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the changelog
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }

    /// Mark as dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Record an updated version file
    pub fn add_updated_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.updated_files.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_release_type_from_str() {
        assert_eq!(ReleaseType::from_str("major").unwrap(), ReleaseType::Major);
        assert_eq!(ReleaseType::from_str("MINOR").unwrap(), ReleaseType::Minor);
        assert_eq!(ReleaseType::from_str("patch").unwrap(), ReleaseType::Patch);
        assert!(ReleaseType::from_str("invalid").is_err());
    }

    #[test]
    fn test_release_type_ordering() {
        assert!(ReleaseType::Major > ReleaseType::Minor);
        assert!(ReleaseType::Minor > ReleaseType::Patch);
        assert_eq!(ReleaseType::Patch.max(ReleaseType::Minor), ReleaseType::Minor);
    }

    #[test]
    fn test_release_result_builder() {
        let result = ReleaseResult::new("0.9.0", "1.0.0")
            .with_release_type(ReleaseType::Major)
            .with_tag("release-1.0.0")
            .add_updated_file("package.json");

        assert_eq!(result.previous_version, "0.9.0");
        assert_eq!(result.new_version, "1.0.0");
        assert_eq!(result.release_type, ReleaseType::Major);
        assert_eq!(result.tag, "release-1.0.0");
        assert_eq!(result.updated_files.len(), 1);
        assert!(!result.dry_run);
    }
}
