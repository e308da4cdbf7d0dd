//! Release workflow helpers

mod version;

pub use version::*;
