//! Version file registry

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bumpkit_core::config::BumpFileConfig;
use bumpkit_core::error::{AdapterError, Result};
use tracing::debug;

use crate::json::JsonVersionFile;
use crate::plain::PlainTextVersionFile;
use crate::toml::TomlVersionFile;
use crate::traits::VersionFile;

/// Manifest names looked for when setting up a project
const KNOWN_FILES: &[&str] = &["package.json", "Cargo.toml", "pyproject.toml", "VERSION"];

/// Registry of version file formats
pub struct VersionFileRegistry {
    handlers: Vec<Arc<dyn VersionFile>>,
}

impl VersionFileRegistry {
    /// Create a registry with all built-in formats
    pub fn new() -> Self {
        Self {
            handlers: vec![
                Arc::new(JsonVersionFile::new()),
                Arc::new(TomlVersionFile::new()),
                Arc::new(PlainTextVersionFile::new()),
            ],
        }
    }

    /// Get a handler by format name
    pub fn get(&self, name: &str) -> Option<Arc<dyn VersionFile>> {
        self.handlers.iter().find(|h| h.name() == name).cloned()
    }

    /// Handler for a configured bump file: the explicit format if set,
    /// otherwise whichever format recognizes the file name
    pub fn for_file(&self, file: &BumpFileConfig) -> Result<Arc<dyn VersionFile>> {
        match &file.format {
            Some(format) => self
                .get(format)
                .ok_or_else(|| AdapterError::UnsupportedFormat(format.clone()).into()),
            None => self.for_path(&file.path),
        }
    }

    /// Handler recognizing the file name
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn VersionFile>> {
        self.handlers
            .iter()
            .find(|h| h.detect(path))
            .cloned()
            .ok_or_else(|| AdapterError::UnsupportedFormat(path.display().to_string()).into())
    }

    /// Known version files present in `dir` that carry a version
    pub fn detect_files(&self, dir: &Path) -> Vec<PathBuf> {
        let found: Vec<PathBuf> = KNOWN_FILES
            .iter()
            .map(|name| dir.join(name))
            .filter(|path| {
                self.for_path(path)
                    .and_then(|handler| handler.read_version(path))
                    .is_ok()
            })
            .collect();

        debug!(count = found.len(), "detected version files");
        found
    }

    /// Format names
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}

impl Default for VersionFileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
