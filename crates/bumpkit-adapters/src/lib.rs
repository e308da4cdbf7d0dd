//! bumpkit Adapters - Version files
//!
//! Reads and writes the version carried by manifest files such as
//! `package.json`, `Cargo.toml`, `pyproject.toml` or a plain `VERSION`.

pub mod json;
pub mod plain;
pub mod registry;
pub mod toml;
mod traits;

pub use json::JsonVersionFile;
pub use plain::PlainTextVersionFile;
pub use registry::VersionFileRegistry;
pub use toml::TomlVersionFile;
pub use traits::VersionFile;
