//! Configuration management for mediq.
//!
//! Loads configuration from ${MEDIQ_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default backend base URL (local development server).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub mod paths {
    //! Path resolution for mediq configuration and data directories.
    //!
    //! MEDIQ_HOME resolution order:
    //! 1. MEDIQ_HOME environment variable (if set)
    //! 2. ~/.config/mediq (default)

    use std::path::PathBuf;

    /// Returns the mediq home directory.
    ///
    /// Checks MEDIQ_HOME env var first, falls back to ~/.config/mediq
    pub fn mediq_home() -> PathBuf {
        if let Ok(home) = std::env::var("MEDIQ_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("mediq"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        mediq_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        mediq_home().join("session.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        mediq_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend API.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        let contents =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        Self::write_config(path, &contents)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Resolves the effective API base URL.
///
/// Precedence: CLI flag > MEDIQ_API_URL env var > config file > built-in
/// default. Trailing slashes are stripped so paths can be appended verbatim.
pub fn resolve_base_url(flag: Option<&str>, env: Option<&str>, config: &Config) -> String {
    let raw = flag
        .or(env)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&config.api_base_url);
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    /// Config loading: file value wins over default.
    #[test]
    fn test_load_reads_base_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "api_base_url = \"https://api.example.com\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains(DEFAULT_API_BASE_URL));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Base URL resolution: flag beats env beats config.
    #[test]
    fn test_resolve_base_url_precedence() {
        let config = Config {
            api_base_url: "http://from-config".to_string(),
        };

        assert_eq!(
            resolve_base_url(Some("http://from-flag"), Some("http://from-env"), &config),
            "http://from-flag"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://from-env"), &config),
            "http://from-env"
        );
        assert_eq!(resolve_base_url(None, None, &config), "http://from-config");
    }

    /// Base URL resolution: empty/whitespace overrides are ignored.
    #[test]
    fn test_resolve_base_url_blank_override_ignored() {
        let config = Config::default();
        assert_eq!(
            resolve_base_url(Some("   "), None, &config),
            DEFAULT_API_BASE_URL
        );
    }

    /// Base URL resolution: trailing slash is stripped.
    #[test]
    fn test_resolve_base_url_strips_trailing_slash() {
        let config = Config::default();
        assert_eq!(
            resolve_base_url(Some("https://api.example.com/"), None, &config),
            "https://api.example.com"
        );
    }
}
