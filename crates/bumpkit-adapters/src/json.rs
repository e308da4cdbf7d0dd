//! JSON version files (`package.json`, `composer.json`, ...)

use std::path::Path;

use bumpkit_core::error::{AdapterError, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::traits::{read_file, write_file, VersionFile};

/// Top-level `"version"` field of a JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonVersionFile;

impl JsonVersionFile {
    /// Create a new JSON version file handler
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<Value> {
        let content = read_file(path)?;
        serde_json::from_str(&content).map_err(|e| {
            AdapterError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl VersionFile for JsonVersionFile {
    fn name(&self) -> &'static str {
        "json"
    }

    fn detect(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "json")
    }

    fn read_version(&self, path: &Path) -> Result<String> {
        let doc = Self::load(path)?;
        doc.get("version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AdapterError::MissingVersion(path.to_path_buf()).into())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn write_version(&self, path: &Path, version: &str) -> Result<()> {
        let mut doc = Self::load(path)?;
        let Some(object) = doc.as_object_mut() else {
            return Err(AdapterError::ParseError {
                path: path.to_path_buf(),
                message: "top level is not an object".to_string(),
            }
            .into());
        };
        if !object.contains_key("version") {
            return Err(AdapterError::MissingVersion(path.to_path_buf()).into());
        }
        object.insert("version".to_string(), Value::String(version.to_string()));

        let mut content = serde_json::to_string_pretty(&doc).map_err(|e| AdapterError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        content.push('\n');

        write_file(path, &content)?;
        debug!(version, "updated json version");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(&path, r#"{"name": "demo", "version": "1.4.0"}"#).unwrap();

        assert_eq!(JsonVersionFile::new().read_version(&path).unwrap(), "1.4.0");
    }

    #[test]
    fn test_write_version_keeps_key_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(
            &path,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.4.0\",\n  \"private\": true\n}\n",
        )
        .unwrap();

        JsonVersionFile::new().write_version(&path, "1.5.0").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.5.0\",\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn test_missing_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(&path, r#"{"name": "demo"}"#).unwrap();

        let handler = JsonVersionFile::new();
        assert!(handler.read_version(&path).is_err());
        assert!(handler.write_version(&path, "1.0.0").is_err());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = JsonVersionFile::new()
            .read_version(&temp.path().join("package.json"))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
