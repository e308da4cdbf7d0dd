//! bumpkit Strategies - Version calculation
//!
//! Parses, bumps and compares semantic versions.

mod semver;
mod traits;
pub mod types;

pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::{BumpType, VersionComponents};
