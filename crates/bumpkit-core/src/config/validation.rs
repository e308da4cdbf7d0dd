//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, ParserConfig};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_versioning(config)?;
    validate_git(config)?;
    validate_parser(&config.parser)?;
    validate_bump_files(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_versioning(config: &Config) -> Result<()> {
    if !config.versioning.tag_format.contains("{version}") {
        return Err(ConfigError::invalid(
            "versioning.tag_format",
            "must contain {version} placeholder",
        )
        .into());
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if !config.git.commit_message.contains("{version}") {
        return Err(
            ConfigError::invalid("git.commit_message", "must contain {version} placeholder").into(),
        );
    }

    Ok(())
}

/// Named groups a `parser.subject_pattern` override must define
pub const SUBJECT_GROUPS: &[&str] = &["type", "scope", "breaking", "title"];

/// Named groups a `parser.merge_pattern` override must define
pub const MERGE_GROUPS: &[&str] = &["id", "source"];

/// Named groups a `parser.revert_pattern` override must define
pub const REVERT_GROUPS: &[&str] = &["subject", "hash"];

/// Named groups a `parser.mention_pattern` override must define
pub const MENTION_GROUPS: &[&str] = &["name"];

const NO_GROUPS: &[&str] = &[];

/// Check every parser override the way the commit parser builds it
pub fn validate_parser(parser: &ParserConfig) -> Result<()> {
    let patterns = [
        ("parser.subject_pattern", &parser.subject_pattern, SUBJECT_GROUPS),
        ("parser.merge_pattern", &parser.merge_pattern, MERGE_GROUPS),
        ("parser.revert_pattern", &parser.revert_pattern, REVERT_GROUPS),
        ("parser.comment_pattern", &parser.comment_pattern, NO_GROUPS),
        ("parser.mention_pattern", &parser.mention_pattern, MENTION_GROUPS),
    ];

    for (field, pattern, groups) in patterns {
        if let Some(pattern) = pattern {
            compile_pattern(field, pattern, groups)?;
        }
    }

    match (&parser.comment_pattern, &parser.comment_char) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::invalid(
                "parser.comment_char",
                "cannot be combined with parser.comment_pattern",
            )
            .into())
        }
        (None, Some(ch)) => {
            comment_char_pattern(ch)?;
        }
        _ => {}
    }

    Ok(())
}

/// Compile a user-supplied pattern and check it defines `groups`
pub fn compile_pattern(
    field: &str,
    pattern: &str,
    groups: &[&str],
) -> std::result::Result<Regex, ConfigError> {
    let regex = Regex::new(pattern).map_err(|e| ConfigError::invalid(field, e.to_string()))?;

    for group in groups {
        if !regex.capture_names().flatten().any(|name| name == *group) {
            return Err(ConfigError::invalid(
                field,
                format!("missing named group `{}`", group),
            ));
        }
    }

    Ok(regex)
}

/// Pattern for lines starting with the single character `ch`
pub fn comment_char_pattern(ch: &str) -> std::result::Result<Regex, ConfigError> {
    let mut chars = ch.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Regex::new(&format!("^{}", regex::escape(&c.to_string())))
            .map_err(|e| ConfigError::invalid("parser.comment_char", e.to_string())),
        _ => Err(ConfigError::invalid(
            "parser.comment_char",
            "must be a single character",
        )),
    }
}

fn validate_bump_files(config: &Config) -> Result<()> {
    let valid_formats = ["json", "toml", "plain"];
    for (i, file) in config.bump_files.iter().enumerate() {
        if file.path.as_os_str().is_empty() {
            return Err(
                ConfigError::invalid(format!("bump_files[{}].path", i), "path cannot be empty")
                    .into(),
            );
        }

        if let Some(format) = &file.format {
            if !valid_formats.contains(&format.as_str()) {
                return Err(ConfigError::invalid(
                    format!("bump_files[{}].format", i),
                    format!("must be one of: {}", valid_formats.join(", ")),
                )
                .into());
            }
        }
    }

    Ok(())
}
