//! Configuration management for the BookVerse client.
//!
//! Loads configuration from ${BOOKVERSE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default backend base URL when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "BOOKVERSE_BASE_URL";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the BookVerse backend.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads the config from the default path.
    ///
    /// Returns defaults if the file doesn't exist yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the config from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Returns the base URL in effect for this process.
    ///
    /// Resolution order: `BOOKVERSE_BASE_URL` env var > config value.
    /// Trailing slashes are trimmed so path joining stays uniform.
    pub fn effective_base_url(&self) -> String {
        let value = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.base_url.clone());
        value.trim_end_matches('/').to_string()
    }

    /// Saves the config to the default path, merged into the commented template.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        let path = paths::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let values = toml::to_string(self).context("Failed to serialize config")?;
        let merged = merge_with_template(&values)?;
        fs::write(&path, merged)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            _ => {}
        }
    }
}

pub mod paths {
    //! Path resolution for BookVerse configuration and data directories.
    //!
    //! BOOKVERSE_HOME resolution order:
    //! 1. BOOKVERSE_HOME environment variable (if set)
    //! 2. ~/.config/bookverse (default)

    use std::path::PathBuf;

    /// Returns the BookVerse home directory.
    ///
    /// Checks BOOKVERSE_HOME env var first, falls back to ~/.config/bookverse
    pub fn bookverse_home() -> PathBuf {
        if let Ok(home) = std::env::var("BOOKVERSE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("bookverse"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        bookverse_home().join("config.toml")
    }

    /// Returns the path to the persisted auth token file.
    pub fn auth_path() -> PathBuf {
        bookverse_home().join("auth.json")
    }

    /// Returns the directory for TUI log files.
    pub fn logs_dir() -> PathBuf {
        bookverse_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: defaults apply when the file is missing.
    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    /// Test: user values survive a parse round trip.
    #[test]
    fn test_load_parses_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://books.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://books.example.com");
    }

    /// Test: template merge keeps comments and overlays user values.
    #[test]
    fn test_merge_with_template_preserves_comments() {
        let merged = merge_with_template("base_url = \"http://10.0.0.2:9000\"\n").unwrap();
        assert!(merged.contains("# Base URL of the BookVerse backend."));
        assert!(merged.contains("base_url = \"http://10.0.0.2:9000\""));
    }

    /// Test: trailing slash is trimmed from the effective base URL.
    #[test]
    fn test_effective_base_url_trims_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8000/".to_string(),
        };
        assert_eq!(config.effective_base_url(), "http://localhost:8000");
    }
}
