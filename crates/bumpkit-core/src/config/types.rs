//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for bumpkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Commit parser configuration
    pub parser: ParserConfig,

    /// Files carrying the project version
    pub bump_files: Vec<BumpFileConfig>,
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Tag format (e.g., "v{version}")
    pub tag_format: String,

    /// Pre-release identifier used when none is given on the command line
    pub prerelease_identifier: Option<String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_format: "v{version}".to_string(),
            prerelease_identifier: None,
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Whether to require clean working directory
    pub require_clean: bool,

    /// Commit message template
    pub commit_message: String,

    /// Tag message template (annotated tags); lightweight tag when unset
    pub tag_message: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            require_clean: true,
            commit_message: "chore(release): {version}".to_string(),
            tag_message: Some("chore(release): {version}".to_string()),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Whether to generate changelog
    pub enabled: bool,

    /// Changelog file path
    pub file: PathBuf,

    /// Header kept at the top of the changelog file
    pub header: String,

    /// Commit types and the section each one renders under, in render order
    pub types: Vec<CommitTypeConfig>,

    /// Whether to include commit hashes
    pub include_hashes: bool,

    /// Whether to include authors
    pub include_authors: bool,

    /// Repository URL used for commit and issue links
    pub repository_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let types = [
            ("feat", "Features", false),
            ("feature", "Features", false),
            ("fix", "Bug Fixes", false),
            ("perf", "Performance Improvements", false),
            ("revert", "Reverts", false),
            ("docs", "Documentation", true),
            ("style", "Styles", true),
            ("refactor", "Code Refactoring", true),
            ("test", "Tests", true),
            ("build", "Build System", true),
            ("ci", "Continuous Integration", true),
            ("chore", "Chores", true),
        ]
        .into_iter()
        .map(|(commit_type, section, hidden)| CommitTypeConfig {
            commit_type: commit_type.to_string(),
            section: section.to_string(),
            hidden,
        })
        .collect();

        Self {
            enabled: true,
            file: PathBuf::from("CHANGELOG.md"),
            header: "# Changelog\n\nAll notable changes to this project will be documented in this file.\n"
                .to_string(),
            types,
            include_hashes: true,
            include_authors: false,
            repository_url: None,
        }
    }
}

impl ChangelogConfig {
    /// Look up the configuration for a commit type
    pub fn type_config(&self, commit_type: &str) -> Option<&CommitTypeConfig> {
        self.types.iter().find(|t| t.commit_type == commit_type)
    }
}

/// Configuration for a commit type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitTypeConfig {
    /// Commit type (feat, fix, ...)
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Section header in changelog
    pub section: String,
    /// Whether to hide this type from changelog
    #[serde(default)]
    pub hidden: bool,
}

/// Commit parser configuration.
///
/// Every field is optional; unset fields fall back to the built-in grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Pattern for `type(scope)!: title` subjects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_pattern: Option<String>,

    /// Pattern for merge commit subjects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_pattern: Option<String>,

    /// Pattern for revert commits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revert_pattern: Option<String>,

    /// Pattern for body lines to strip before extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_pattern: Option<String>,

    /// Comment character; shorthand for a `comment_pattern` of `^<char>.*`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_char: Option<String>,

    /// Pattern for `@name` mentions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_pattern: Option<String>,

    /// Keywords that link a commit to the issues it resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_actions: Option<Vec<String>>,

    /// Prefixes that introduce an issue id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_prefixes: Option<Vec<String>>,

    /// Keywords that open a footer note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_keywords: Option<Vec<String>>,
}

/// A file carrying the project version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpFileConfig {
    /// Path relative to the repository root
    pub path: PathBuf,

    /// File format (json, toml, plain); detected from the extension when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl BumpFileConfig {
    /// Create a bump file entry with a detected format
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.versioning.tag_format, "v{version}");
        assert!(config.git.require_clean);
        assert!(config.changelog.enabled);
        assert!(config.bump_files.is_empty());
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_type_config_lookup() {
        let config = ChangelogConfig::default();
        assert_eq!(config.type_config("feat").unwrap().section, "Features");
        assert!(config.type_config("chore").unwrap().hidden);
        assert!(config.type_config("wip").is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("tag_format:"));
        assert!(!yaml.contains("issue_prefixes"));
    }

    #[test]
    fn test_parser_config_from_toml() {
        let config: Config = toml::from_str(
            "[parser]\nissue_prefixes = [\"#\", \"gh-\"]\ncomment_char = \"#\"\n",
        )
        .unwrap();
        assert_eq!(
            config.parser.issue_prefixes,
            Some(vec!["#".to_string(), "gh-".to_string()])
        );
        assert_eq!(config.parser.comment_char.as_deref(), Some("#"));
    }
}
