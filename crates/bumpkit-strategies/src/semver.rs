//! SemVer version strategy

use std::cmp::Ordering;

use bumpkit_core::error::{Result, VersionError};
use tracing::debug;

use crate::traits::VersionStrategy;
use crate::types::{BumpType, VersionComponents};

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
#[derive(Debug, Clone)]
pub struct SemVerStrategy {
    /// Pre-release identifier used when none is given
    pub default_prerelease: String,
}

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self {
            default_prerelease: "alpha".to_string(),
        }
    }

    /// Set the default prerelease identifier
    pub fn with_default_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.default_prerelease = prerelease.into();
        self
    }

    /// Bump towards a pre-release of `target`.
    ///
    /// A current pre-release that already sits at the `target` level keeps
    /// its version and only advances the counter (`1.1.0-beta.0` to
    /// `1.1.0-beta.1`). Otherwise the version is bumped and the counter
    /// starts at zero (`1.0.0` to `1.1.0-beta.0`).
    pub fn bump_prerelease(
        &self,
        current: &VersionComponents,
        target: BumpType,
        identifier: Option<&str>,
    ) -> Result<VersionComponents> {
        let identifier = identifier.unwrap_or(&self.default_prerelease);

        let at_level = current.is_prerelease()
            && match target {
                BumpType::Major => current.minor == 0 && current.patch == 0,
                BumpType::Minor => current.patch == 0,
                BumpType::Patch | BumpType::Prerelease => true,
            };

        let mut result = if at_level {
            current.clone()
        } else {
            self.bump(current, target.max(BumpType::Patch))?
        };

        result.prerelease = Some(match current.prerelease.as_deref() {
            Some(pre) if at_level && pre_identifier(pre) == identifier => next_prerelease(pre),
            _ => format!("{}.0", identifier),
        });
        result.build = None;

        debug!(from = %current, to = %result, "prerelease bump");
        Ok(result)
    }
}

impl Default for SemVerStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// `beta` for `beta.3`
fn pre_identifier(pre: &str) -> &str {
    match pre.rsplit_once('.') {
        Some((identifier, n)) if n.parse::<u64>().is_ok() => identifier,
        _ => pre,
    }
}

/// `beta.4` for `beta.3`, `beta.0` for `beta`
fn next_prerelease(pre: &str) -> String {
    match pre.rsplit_once('.') {
        Some((identifier, n)) => match n.parse::<u64>() {
            Ok(n) => format!("{}.{}", identifier, n + 1),
            Err(_) => format!("{}.0", pre),
        },
        None => format!("{}.0", pre),
    }
}

fn parse_semver(version: &str) -> Result<semver::Version> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    semver::Version::parse(version)
        .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()).into())
}

impl VersionStrategy for SemVerStrategy {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, version: &str) -> Result<VersionComponents> {
        let v = parse_semver(version)?;

        Ok(VersionComponents {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: (!v.pre.is_empty()).then(|| v.pre.to_string()),
            build: (!v.build.is_empty()).then(|| v.build.to_string()),
        })
    }

    fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> Result<VersionComponents> {
        let mut result = current.clone();

        match bump_type {
            BumpType::Major => {
                // 2.0.0-rc.1 releases as 2.0.0
                if !(result.is_prerelease() && result.minor == 0 && result.patch == 0) {
                    result.major += 1;
                }
                result.minor = 0;
                result.patch = 0;
            }
            BumpType::Minor => {
                if !(result.is_prerelease() && result.patch == 0) {
                    result.minor += 1;
                }
                result.patch = 0;
            }
            BumpType::Patch => {
                if !result.is_prerelease() {
                    result.patch += 1;
                }
            }
            BumpType::Prerelease => {
                return self.bump_prerelease(current, BumpType::Prerelease, None);
            }
        }

        result.prerelease = None;
        result.build = None;

        Ok(result)
    }

    fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        Ok(parse_semver(a)?.cmp(&parse_semver(b)?))
    }
}
