//! Version naming helpers

use tracing::debug;

use crate::config::Config;

const VERSION_PLACEHOLDER: &str = "{version}";

/// Format a version tag based on the configuration
pub fn format_tag(config: &Config, version: &str) -> String {
    config
        .versioning
        .tag_format
        .replace(VERSION_PLACEHOLDER, version)
}

/// Release commit message for a version
pub fn format_commit_message(config: &Config, version: &str) -> String {
    config.git.commit_message.replace(VERSION_PLACEHOLDER, version)
}

/// Tag annotation for a version; `None` means a lightweight tag
pub fn format_tag_message(config: &Config, version: &str) -> Option<String> {
    config
        .git
        .tag_message
        .as_ref()
        .map(|m| m.replace(VERSION_PLACEHOLDER, version))
}

/// Tag prefix derived from the tag format, used to recognise release tags.
///
/// `v{version}` yields `v`, `pkg@{version}` yields `pkg@`.
pub fn tag_prefix(config: &Config) -> &str {
    let format = config.versioning.tag_format.as_str();
    let prefix = format
        .find(VERSION_PLACEHOLDER)
        .map_or(format, |pos| &format[..pos]);
    debug!(prefix, "derived tag prefix");
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag() {
        let config = Config::default();
        assert_eq!(format_tag(&config, "1.0.0"), "v1.0.0");
    }

    #[test]
    fn test_format_tag_custom() {
        let mut config = Config::default();
        config.versioning.tag_format = "release-{version}".to_string();
        assert_eq!(format_tag(&config, "2.1.0"), "release-2.1.0");
        assert_eq!(tag_prefix(&config), "release-");
    }

    #[test]
    fn test_format_commit_message() {
        let config = Config::default();
        assert_eq!(
            format_commit_message(&config, "1.2.0"),
            "chore(release): 1.2.0"
        );
    }

    #[test]
    fn test_lightweight_tag_without_message() {
        let mut config = Config::default();
        config.git.tag_message = None;
        assert_eq!(format_tag_message(&config, "1.0.0"), None);
    }
}
