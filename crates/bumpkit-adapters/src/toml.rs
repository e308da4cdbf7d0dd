//! TOML version files (`Cargo.toml`, `pyproject.toml`, ...)

use std::path::Path;

use bumpkit_core::error::{AdapterError, Result};
use toml_edit::{value, DocumentMut, Item};
use tracing::{debug, instrument};

use crate::traits::{read_file, write_file, VersionFile};

/// Tables searched for a `version` key, in order; top level last
const VERSION_TABLES: &[&str] = &["package", "project", "tool.poetry"];

/// `version` in `[package]`, `[project]`, `[tool.poetry]` or at the top level
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlVersionFile;

impl TomlVersionFile {
    /// Create a new TOML version file handler
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<DocumentMut> {
        let content = read_file(path)?;
        content.parse().map_err(|e: toml_edit::TomlError| {
            AdapterError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Mutable `version` item, if the document has one as a string
fn version_item<'a>(doc: &'a mut DocumentMut) -> Option<&'a mut Item> {
    let mut found: Option<Vec<&str>> = None;
    for table in VERSION_TABLES {
        let keys: Vec<&str> = table.split('.').collect();
        if lookup(doc.as_item(), &keys).is_some() {
            found = Some(keys);
            break;
        }
    }

    let mut item = doc.as_item_mut();
    for key in found.unwrap_or_default() {
        item = item.get_mut(key)?;
    }
    let version = item.get_mut("version")?;
    version.is_str().then_some(version)
}

fn lookup<'a>(item: &'a Item, keys: &[&str]) -> Option<&'a str> {
    let mut item = item;
    for key in keys {
        item = item.get(key)?;
    }
    item.get("version")?.as_str()
}

impl VersionFile for TomlVersionFile {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn detect(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "toml")
    }

    fn read_version(&self, path: &Path) -> Result<String> {
        let mut doc = Self::load(path)?;
        version_item(&mut doc)
            .and_then(|item| item.as_str())
            .map(str::to_string)
            .ok_or_else(|| AdapterError::MissingVersion(path.to_path_buf()).into())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn write_version(&self, path: &Path, version: &str) -> Result<()> {
        let mut doc = Self::load(path)?;
        let Some(item) = version_item(&mut doc) else {
            return Err(AdapterError::MissingVersion(path.to_path_buf()).into());
        };

        // Keep the decor (comments, spacing) of the original value
        let decor = item.as_value().map(|v| v.decor().clone());
        *item = value(version);
        if let (Some(decor), Some(new)) = (decor, item.as_value_mut()) {
            *new.decor_mut() = decor;
        }

        write_file(path, &doc.to_string())?;
        debug!(version, "updated toml version");
        Ok(())
    }
}
