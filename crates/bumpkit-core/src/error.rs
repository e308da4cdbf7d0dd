//! Error types for bumpkit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BumpkitError
pub type Result<T> = std::result::Result<T, BumpkitError>;

/// Main error type for bumpkit operations
#[derive(Debug, Error)]
pub enum BumpkitError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Version file errors
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Shorthand for an invalid field value
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Path is outside the repository work tree
    #[error("Path is not inside the repository work tree: {0}")]
    OutsideWorkdir(PathBuf),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse version
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),

    /// Semver error
    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Commit record could not be parsed
    #[error(transparent)]
    Commit(#[from] CommitFormatError),

    /// Failed to read an existing changelog
    #[error("Failed to read changelog {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write changelog
    #[error("Failed to write changelog {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structural problems with a raw commit record.
///
/// A record is `subject\nbody\nhash\ndate\nname\nemail` with an optional
/// trailing newline. Anything that shifts those trailer fields out of
/// position is reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitFormatError {
    /// Fewer lines than subject + body + four trailer fields
    #[error("commit record has {found} fields, expected at least 6")]
    TooFewFields { found: usize },

    /// Hash field is not a hex object id
    #[error("commit hash field is not a hex object id: {0:?}")]
    InvalidHash(String),

    /// Date field is not an ISO-8601 timestamp
    #[error("commit date field is not an ISO-8601 timestamp: {0:?}")]
    InvalidDate(String),

    /// Name field is empty or looks like another trailer field
    #[error("commit author name field is malformed: {0:?}")]
    InvalidName(String),

    /// Email field is missing or malformed
    #[error("commit author email field is malformed: {0:?}")]
    InvalidEmail(String),
}

/// Version file errors
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Version file not found
    #[error("Version file not found at {0}")]
    FileNotFound(PathBuf),

    /// Failed to parse version file
    #[error("Failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// File has no version field
    #[error("No version field found in {0}")]
    MissingVersion(PathBuf),

    /// Unsupported file format
    #[error("Unsupported version file format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BumpkitError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
