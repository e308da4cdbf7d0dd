//! Commit parsing

mod conventional;
mod options;
mod record;

pub use conventional::CommitParser;
pub use options::{
    ParserOptions, DEFAULT_ISSUE_PREFIXES, DEFAULT_NOTE_KEYWORDS, DEFAULT_REFERENCE_ACTIONS,
};
