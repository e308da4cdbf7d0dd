//! Parser options
//!
//! Every pattern the parser uses lives here, compiled once. Options are
//! built from defaults or from a [`ParserConfig`]; user overrides are
//! checked for the named groups the parser reads.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use bumpkit_core::config::{
    comment_char_pattern, compile_pattern, ParserConfig, MENTION_GROUPS, MERGE_GROUPS,
    REVERT_GROUPS, SUBJECT_GROUPS,
};
use bumpkit_core::error::ConfigError;

/// Default keywords that link a commit to the issues it resolves
pub const DEFAULT_REFERENCE_ACTIONS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

/// Default issue prefixes
pub const DEFAULT_ISSUE_PREFIXES: &[&str] = &["#"];

/// Default note keywords
pub const DEFAULT_NOTE_KEYWORDS: &[&str] = &["BREAKING CHANGE", "BREAKING-CHANGE"];

static SUBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?: (?P<title>.+)$")
        .expect("Invalid regex")
});

static MERGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #(?P<id>\d+) from (?P<source>.+)$").expect("Invalid regex")
});

static REVERT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^Revert "(?P<subject>[^\n]*)"\s*(?:This reverts commit (?P<hash>\w*)\.)?"#)
        .expect("Invalid regex")
});

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\W)@(?P<name>[\w-]+)").expect("Invalid regex"));

static DEFAULT_ACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    action_regex(DEFAULT_REFERENCE_ACTIONS).expect("Invalid regex")
});

static DEFAULT_ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| issue_regex(DEFAULT_ISSUE_PREFIXES).expect("Invalid regex"));

static DEFAULT_NOTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| note_regex(DEFAULT_NOTE_KEYWORDS).expect("Invalid regex"));

/// Compiled parser options
#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub(crate) subject_pattern: Regex,
    pub(crate) merge_pattern: Regex,
    pub(crate) revert_pattern: Regex,
    pub(crate) comment_pattern: Option<Regex>,
    pub(crate) mention_pattern: Regex,
    pub(crate) action_pattern: Regex,
    pub(crate) issue_pattern: Regex,
    pub(crate) note_pattern: Regex,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            subject_pattern: SUBJECT_REGEX.clone(),
            merge_pattern: MERGE_REGEX.clone(),
            revert_pattern: REVERT_REGEX.clone(),
            comment_pattern: None,
            mention_pattern: MENTION_REGEX.clone(),
            action_pattern: DEFAULT_ACTION_REGEX.clone(),
            issue_pattern: DEFAULT_ISSUE_REGEX.clone(),
            note_pattern: DEFAULT_NOTE_REGEX.clone(),
        }
    }
}

impl ParserOptions {
    /// Build options from configuration, falling back to defaults for
    /// anything unset or empty
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Some(pattern) = &config.subject_pattern {
            options.subject_pattern =
                compile_pattern("parser.subject_pattern", pattern, SUBJECT_GROUPS)?;
        }
        if let Some(pattern) = &config.merge_pattern {
            options.merge_pattern =
                compile_pattern("parser.merge_pattern", pattern, MERGE_GROUPS)?;
        }
        if let Some(pattern) = &config.revert_pattern {
            options.revert_pattern =
                compile_pattern("parser.revert_pattern", pattern, REVERT_GROUPS)?;
        }
        if let Some(pattern) = &config.mention_pattern {
            options.mention_pattern =
                compile_pattern("parser.mention_pattern", pattern, MENTION_GROUPS)?;
        }

        options.comment_pattern = match (&config.comment_pattern, &config.comment_char) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    "parser.comment_char",
                    "cannot be combined with parser.comment_pattern",
                ))
            }
            (Some(pattern), None) => Some(compile_pattern("parser.comment_pattern", pattern, &[])?),
            (None, Some(ch)) => Some(comment_char_pattern(ch)?),
            (None, None) => None,
        };

        if let Some(actions) = non_empty(config.reference_actions.as_deref()) {
            options.action_pattern = action_regex(&actions)
                .map_err(|e| ConfigError::invalid("parser.reference_actions", e.to_string()))?;
        }
        if let Some(prefixes) = non_empty(config.issue_prefixes.as_deref()) {
            options.issue_pattern = issue_regex(&prefixes)
                .map_err(|e| ConfigError::invalid("parser.issue_prefixes", e.to_string()))?;
        }
        if let Some(keywords) = non_empty(config.note_keywords.as_deref()) {
            options.note_pattern = note_regex(&keywords)
                .map_err(|e| ConfigError::invalid("parser.note_keywords", e.to_string()))?;
        }

        debug!(
            comments = options.comment_pattern.is_some(),
            "built parser options"
        );
        Ok(options)
    }
}

/// Trimmed, non-empty entries, or `None` when nothing is left
fn non_empty(values: Option<&[String]>) -> Option<Vec<&str>> {
    let values: Vec<&str> = values?
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Alternation of escaped words, longest first so `closes` wins over `close`
fn alternation<S: AsRef<str>>(words: &[S]) -> String {
    let mut words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()));
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

fn action_regex<S: AsRef<str>>(actions: &[S]) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b(?P<action>{})\b", alternation(actions)))
}

fn issue_regex<S: AsRef<str>>(prefixes: &[S]) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:(?P<owner>[\w-]+)/(?P<repository>[\w.-]+))?(?P<prefix>(?i:{}))(?P<issue>\w*\d\w*)",
        alternation(prefixes)
    ))
}

fn note_regex<S: AsRef<str>>(keywords: &[S]) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^\s*(?P<title>{})\s*:\s*(?P<text>.*)$",
        alternation(keywords)
    ))
}
