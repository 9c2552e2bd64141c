//! Configuration management.
//!
//! Loads configuration from ${TRAINING_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api_base_url`.
pub const API_BASE_URL_ENV: &str = "TRAINING_API_BASE_URL";
/// Environment variable overriding `cas_base_url`.
pub const CAS_BASE_URL_ENV: &str = "TRAINING_CAS_BASE_URL";

/// Returns the default configuration template.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and log directories.
    //!
    //! TRAINING_HOME resolution order:
    //! 1. TRAINING_HOME environment variable (if set)
    //! 2. ~/.config/training (default)

    use std::path::PathBuf;

    pub const HOME_ENV: &str = "TRAINING_HOME";

    /// Returns the training home directory.
    pub fn training_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            let trimmed = home.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("training"))
            .unwrap_or_else(|| PathBuf::from(".training"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        training_home().join("config.toml")
    }

    /// Returns the directory rolling log files are written to.
    pub fn logs_dir() -> PathBuf {
        training_home().join("logs")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub cas_base_url: String,
    pub cas_service: String,
    /// Look-ahead of the upcoming-courses listing.
    pub upcoming_window_hours: u32,
    /// 0 leaves the HTTP client default in place.
    pub request_timeout_secs: u32,
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &str = "http://gdctools:8090/training/resteasy/training";
    pub const DEFAULT_CAS_BASE_URL: &str = "http://gdctools:8080/cas";
    pub const DEFAULT_CAS_SERVICE: &str = "http://gdctools:8090/training";
    const DEFAULT_UPCOMING_WINDOW_HOURS: u32 = 60;
    const DEFAULT_LOG_LEVEL: &str = "info";

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

    /// Backend base URL: env, then config, then default.
    pub fn effective_api_base_url(&self) -> Result<String> {
        resolve_base_url(
            Some(&self.api_base_url),
            API_BASE_URL_ENV,
            Self::DEFAULT_API_BASE_URL,
            "API",
        )
    }

    /// CAS base URL: env, then config, then default.
    pub fn effective_cas_base_url(&self) -> Result<String> {
        resolve_base_url(
            Some(&self.cas_base_url),
            CAS_BASE_URL_ENV,
            Self::DEFAULT_CAS_BASE_URL,
            "CAS",
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a config TOML from Rust defaults.
    pub fn generate() -> Result<String> {
        toml::to_string(&Config::default()).context("Failed to serialize default config to TOML")
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

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            cas_base_url: Self::DEFAULT_CAS_BASE_URL.to_string(),
            cas_service: Self::DEFAULT_CAS_SERVICE.to_string(),
            upcoming_window_hours: Self::DEFAULT_UPCOMING_WINDOW_HOURS,
            request_timeout_secs: 0,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Resolves a base URL with precedence: env var > config > default.
///
/// Blank values are treated as unset. Non-default values must parse as URLs.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    name: &str,
) -> Result<String> {
    resolve_url_from(
        std::env::var(env_var).ok().as_deref(),
        config_base_url,
        default_url,
        name,
    )
}

fn resolve_url_from(
    env_url: Option<&str>,
    config_url: Option<&str>,
    default_url: &str,
    name: &str,
) -> Result<String> {
    let chosen = [env_url, config_url]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty());

    match chosen {
        Some(url) => {
            url::Url::parse(url).with_context(|| format!("Invalid {name} base URL: {url}"))?;
            Ok(url.to_string())
        }
        None => Ok(default_url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.upcoming_window_hours, 60);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "upcoming_window_hours = 24\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();

        assert_eq!(config.upcoming_window_hours, 24);
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "upcoming_window_hours = \"soon\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Base URL of the training REST backend."));
        assert_eq!(Config::load_from(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_template_matches_generated_defaults() {
        let from_template: Config = toml::from_str(default_config_template()).unwrap();
        let generated: Config = toml::from_str(&Config::generate().unwrap()).unwrap();

        assert_eq!(from_template, generated);
    }

    #[test]
    fn test_request_timeout_zero_uses_client_default() {
        let mut config = Config::default();
        assert_eq!(config.request_timeout(), None);

        config.request_timeout_secs = 15;
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_env_url_wins_over_config() {
        let url = resolve_url_from(
            Some(" http://env.example/api "),
            Some("http://config.example/api"),
            "http://default.example",
            "API",
        )
        .unwrap();
        assert_eq!(url, "http://env.example/api");
    }

    #[test]
    fn test_blank_values_fall_back_to_default() {
        let url = resolve_url_from(Some("  "), Some(""), "http://default.example", "API").unwrap();
        assert_eq!(url, "http://default.example");
    }

    #[test]
    fn test_invalid_config_url_is_error() {
        let err = resolve_url_from(None, Some("not a url"), "http://default.example", "CAS")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid CAS base URL"));
    }
}
