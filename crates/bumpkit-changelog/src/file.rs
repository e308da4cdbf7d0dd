//! Changelog file updates

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use bumpkit_core::error::ChangelogError;
use tracing::{debug, info, instrument};

/// Insert a rendered entry at the top of a changelog file.
///
/// The file keeps `header` first, then the new entry, then every previous
/// release starting at its `## ` heading. Whatever sat above the first
/// release heading is replaced by `header`. A missing file is created.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn prepend_changelog(path: &Path, header: &str, entry: &str) -> Result<(), ChangelogError> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ChangelogError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let previous = previous_releases(&existing, header);
    debug!(previous_len = previous.len(), "merging changelog entry");

    let mut content = String::new();
    let header = header.trim_end();
    if !header.is_empty() {
        content.push_str(header);
        content.push_str("\n\n");
    }
    content.push_str(entry.trim_end());
    content.push('\n');
    if !previous.is_empty() {
        content.push('\n');
        content.push_str(previous);
        content.push('\n');
    }

    fs::write(path, content).map_err(|source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "changelog updated");
    Ok(())
}

/// Existing content from the first release heading on
fn previous_releases<'a>(existing: &'a str, header: &str) -> &'a str {
    let start = if existing.starts_with("## ") {
        Some(0)
    } else {
        existing.find("\n## ").map(|i| i + 1)
    };

    match start {
        Some(i) => existing[i..].trim_end(),
        None => existing
            .strip_prefix(header.trim_end())
            .unwrap_or(existing)
            .trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "# Changelog\n";

    #[test]
    fn test_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        prepend_changelog(&path, HEADER, "## 1.0.0 (2024-01-15)\n\n* first\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "# Changelog\n\n## 1.0.0 (2024-01-15)\n\n* first\n");
    }

    #[test]
    fn test_prepends_above_previous_release() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        fs::write(
            &path,
            "# Old title\n\nintro\n\n## 1.0.0 (2024-01-15)\n\n* first\n",
        )
        .unwrap();

        prepend_changelog(&path, HEADER, "## 1.1.0 (2024-02-01)\n\n* second\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Changelog\n\n## 1.1.0 (2024-02-01)\n\n* second\n\n## 1.0.0 (2024-01-15)\n\n* first\n"
        );
    }

    #[test]
    fn test_keeps_content_without_release_headings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        fs::write(&path, "# Changelog\n\nHand-written notes.\n").unwrap();

        prepend_changelog(&path, HEADER, "## 0.1.0 (2024-01-15)\n").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("## 0.1.0 (2024-01-15)\n\nHand-written notes.\n"));
        assert_eq!(content.matches("# Changelog").count(), 1);
    }
}
