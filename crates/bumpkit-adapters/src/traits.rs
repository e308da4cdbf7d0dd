//! Version file traits

use std::path::Path;

use bumpkit_core::error::{AdapterError, Result};

/// A file format that carries a version string
pub trait VersionFile: Send + Sync {
    /// Format name as used in configuration (`json`, `toml`, `plain`)
    fn name(&self) -> &'static str;

    /// Check if this format applies to the given file
    fn detect(&self, path: &Path) -> bool;

    /// Read the current version
    fn read_version(&self, path: &Path) -> Result<String>;

    /// Replace the version, leaving the rest of the file as it was
    fn write_version(&self, path: &Path, version: &str) -> Result<()>;
}

/// Read a version file, reporting a missing file as such
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AdapterError::FileNotFound(path.to_path_buf()).into(),
        _ => AdapterError::Io(e).into(),
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| AdapterError::Io(e).into())
}
