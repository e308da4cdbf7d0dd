//! Version strategy types

use bumpkit_core::ReleaseType;
use serde::{Deserialize, Serialize};

/// Version components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComponents {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Pre-release identifier
    pub prerelease: Option<String>,
    /// Build metadata
    pub build: Option<String>,
}

impl VersionComponents {
    /// Create new version components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Set prerelease
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    /// Set build metadata
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Whether this is a pre-release
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Convert to string representation
    pub fn to_version_string(&self) -> String {
        let mut v = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            v.push('-');
            v.push_str(pre);
        }

        if let Some(build) = &self.build {
            v.push('+');
            v.push_str(build);
        }

        v
    }
}

impl std::fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_version_string())
    }
}

/// Type of version bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Major version bump (breaking changes)
    Major,
    /// Minor version bump (new features)
    Minor,
    /// Patch version bump (bug fixes)
    Patch,
    /// Next pre-release of the current version
    Prerelease,
}

impl BumpType {
    /// Get the higher priority bump type
    pub fn max(self, other: Self) -> Self {
        use BumpType::*;
        match (self, other) {
            (Major, _) | (_, Major) => Major,
            (Minor, _) | (_, Minor) => Minor,
            (Patch, _) | (_, Patch) => Patch,
            (Prerelease, Prerelease) => Prerelease,
        }
    }
}

impl From<ReleaseType> for BumpType {
    fn from(release_type: ReleaseType) -> Self {
        match release_type {
            ReleaseType::Major => Self::Major,
            ReleaseType::Minor => Self::Minor,
            ReleaseType::Patch => Self::Patch,
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::Prerelease => write!(f, "prerelease"),
        }
    }
}
