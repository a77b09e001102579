//! Scan configuration
//!
//! Looked up in `<root>/.treeignore.toml`, then in
//! `~/.treeignore/config.toml`. Every field has a default, so an absent file
//! or a partial one is fine.

use crate::core::error::{Result, TreeIgnoreError};
use crate::ignore::scanner::DEFAULT_RULE_FILE;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-tree configuration file
pub const LOCAL_CONFIG_FILE: &str = ".treeignore.toml";

/// Configuration of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rule file name looked up in every directory
    pub rule_file: String,
    /// Regular expressions applied after the rules of every rule file
    pub custom_rules: Vec<String>,
    /// Descend into symbolic links to directories
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rule_file: DEFAULT_RULE_FILE.to_string(),
            custom_rules: Vec::new(),
            follow_links: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ScanConfig =
            toml::from_str(&content).map_err(|e| TreeIgnoreError::ConfigurationError {
                reason: format!("Failed to parse {}: {}", path.display(), e),
            })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Configuration for a scan of `root`: the tree's own file if present,
    /// else the user's global file, else defaults
    pub fn discover(root: &Path) -> Result<Self> {
        let local = root.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }

        match Self::get_global_config_path() {
            Ok(global) => Self::load(&global),
            Err(TreeIgnoreError::HomeDirectoryNotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Save configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| TreeIgnoreError::ConfigurationError {
                reason: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the user's global configuration file
    pub fn get_global_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(TreeIgnoreError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".treeignore").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config = ScanConfig::load(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.rule_file, ".gitignore");
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "custom_rules = ['.*\\.jar$']\n")?;

        let config = ScanConfig::load(&path)?;
        assert_eq!(config.rule_file, ".gitignore");
        assert_eq!(config.custom_rules, vec![r".*\.jar$".to_string()]);
        assert!(!config.follow_links);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_a_configuration_error() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "rule_file = [not toml")?;

        let result = ScanConfig::load(&path);
        assert!(matches!(result, Err(TreeIgnoreError::ConfigurationError { .. })));
        Ok(())
    }

    #[test]
    fn test_discover_prefers_local_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            "rule_file = '.ignore'\nfollow_links = true\n",
        )?;

        let config = ScanConfig::discover(temp_dir.path())?;
        assert_eq!(config.rule_file, ".ignore");
        assert!(config.follow_links);
        Ok(())
    }

    #[test]
    fn test_save_round_trip() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = ScanConfig {
            rule_file: ".ignore".to_string(),
            custom_rules: vec![r".*\.idea(/|$)".to_string()],
            follow_links: true,
        };

        config.save(&path)?;
        assert_eq!(ScanConfig::load(&path)?, config);
        Ok(())
    }
}
