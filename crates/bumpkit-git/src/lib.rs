//! bumpkit Git - Git operations for release bookkeeping
//!
//! This crate provides the repository operations a release needs: reading
//! commit history as raw records, finding release tags, and recording the
//! release commit and tag.

mod commits;
mod release;
mod repository;
mod status;
mod tags;
pub mod types;
mod vcs;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
pub use vcs::VersionControl;
