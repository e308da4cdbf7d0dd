//! Plain text version files (`VERSION`, `version.txt`)

use std::path::Path;

use bumpkit_core::error::{AdapterError, Result};
use tracing::debug;

use crate::traits::{read_file, write_file, VersionFile};

/// A file holding nothing but the version
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextVersionFile;

impl PlainTextVersionFile {
    /// Create a new plain text version file handler
    pub fn new() -> Self {
        Self
    }
}

impl VersionFile for PlainTextVersionFile {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn detect(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => {
                name.eq_ignore_ascii_case("VERSION")
                    || name.eq_ignore_ascii_case("version.txt")
            }
            None => false,
        }
    }

    fn read_version(&self, path: &Path) -> Result<String> {
        let content = read_file(path)?;
        let version = content.trim();
        if version.is_empty() {
            return Err(AdapterError::MissingVersion(path.to_path_buf()).into());
        }
        Ok(version.to_string())
    }

    fn write_version(&self, path: &Path, version: &str) -> Result<()> {
        write_file(path, &format!("{}\n", version))?;
        debug!(path = %path.display(), version, "updated plain version");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("VERSION");
        std::fs::write(&path, "  1.0.0\n\n").unwrap();

        let handler = PlainTextVersionFile::new();
        assert_eq!(handler.read_version(&path).unwrap(), "1.0.0");

        handler.write_version(&path, "1.0.1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1.0.1\n");
    }

    #[test]
    fn test_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("VERSION");
        std::fs::write(&path, "\n").unwrap();
        assert!(PlainTextVersionFile::new().read_version(&path).is_err());
    }
}
