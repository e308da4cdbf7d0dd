//! bumpkit Core - Core library for release bookkeeping
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the bumpkit crates.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{BumpkitError, CommitFormatError, Result};
pub use types::{ReleaseResult, ReleaseType};
