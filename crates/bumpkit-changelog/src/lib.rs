//! bumpkit Changelog - Commit parsing and changelog generation
//!
//! This crate turns raw commit records into structured [`Commit`] values,
//! drops reverted work, recommends a release type and renders changelog
//! entries.

pub mod file;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod recommend;
pub mod revert;
pub mod types;

pub use file::prepend_changelog;
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, ParserOptions};
pub use recommend::{recommend_release, Recommendation};
pub use revert::filter_reverted_commits;
pub use types::{ChangelogEntry, Commit, Merge, Note, Reference, Revert, Section};
