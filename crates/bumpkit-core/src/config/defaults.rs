//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "bumpkit.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "bumpkit.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".bumpkit.toml",
        ".bumpkit.yaml",
    ]
}

/// Default configuration template written by `bumpkit init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# bumpkit configuration

bump_files = [
  { path = "package.json" },
]

[versioning]
tag_format = "v{version}"

[git]
require_clean = true
commit_message = "chore(release): {version}"
tag_message = "chore(release): {version}"

[changelog]
enabled = true
file = "CHANGELOG.md"
include_hashes = true
include_authors = false
# repository_url = "https://github.com/owner/repo"

[parser]
# comment_char = "#"
# issue_prefixes = ["#"]
# note_keywords = ["BREAKING CHANGE", "BREAKING-CHANGE"]
# reference_actions = ["close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved"]
"##;
