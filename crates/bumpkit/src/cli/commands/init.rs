//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use bumpkit_adapters::VersionFileRegistry;
use bumpkit_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli};

/// Bump files entry of the template, replaced with what is detected
const TEMPLATE_BUMP_FILES: &str = "bump_files = [\n  { path = \"package.json\" },\n]\n";

/// Write a starter bumpkit configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = cli.working_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let detected = VersionFileRegistry::new().detect_files(&cwd);
        let content = render_template(&cwd, &detected);
        std::fs::write(&config_path, content)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            if detected.is_empty() {
                output::warning("No version files found; add them to bump_files");
            }
            for path in &detected {
                println!("{}", output::key_value("bump file", &path.display().to_string()));
            }
        }

        Ok(())
    }
}

/// Default template with `bump_files` listing the detected files
fn render_template(root: &Path, detected: &[PathBuf]) -> String {
    let entries: String = detected
        .iter()
        .map(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path);
            format!("  {{ path = {:?} }},\n", relative.display().to_string())
        })
        .collect();

    DEFAULT_CONFIG_TEMPLATE.replace(TEMPLATE_BUMP_FILES, &format!("bump_files = [\n{}]\n", entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpkit_core::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_template_lists_detected_files() {
        let temp = TempDir::new().unwrap();
        let detected = vec![temp.path().join("Cargo.toml"), temp.path().join("VERSION")];

        let content = render_template(temp.path(), &detected);
        let config: Config = toml::from_str(&content).unwrap();

        let paths: Vec<_> = config.bump_files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("Cargo.toml"), PathBuf::from("VERSION")]);
    }

    #[test]
    fn test_template_without_files() {
        let temp = TempDir::new().unwrap();
        let content = render_template(temp.path(), &[]);
        let config: Config = toml::from_str(&content).unwrap();
        assert!(config.bump_files.is_empty());
    }
}
