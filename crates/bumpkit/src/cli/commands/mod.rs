//! CLI commands

mod changelog;
mod init;
mod parse;
mod release;
mod version;

pub use changelog::ChangelogCommand;
pub use init::InitCommand;
pub use parse::ParseCommand;
pub use release::ReleaseCommand;
pub use version::VersionCommand;
