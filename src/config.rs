//! Connection settings.
//!
//! Resolved from, highest precedence first:
//!
//! | Source | Keys |
//! |--------|------|
//! | CLI flags | `--url`, `--api-key` |
//! | Environment (a `.env` file is loaded first) | `LABEL_STUDIO_URL`, `LABEL_STUDIO_API_KEY` |
//! | `~/.config/lsx/config.toml` | `url`, `api_key`, `page_size`, `timeout_secs` |
//! | Defaults | `http://localhost:8080`, page size `100`, timeout `30`s |
//!
//! ```toml
//! url = "https://label-studio.example.com"
//! api_key = "0123456789abcdef"
//! page_size = 200
//! timeout_secs = 60
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const URL_ENV: &str = "LABEL_STUDIO_URL";
pub const API_KEY_ENV: &str = "LABEL_STUDIO_API_KEY";

pub const DEFAULT_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key is required. Set LABEL_STUDIO_API_KEY (environment or .env file) or pass --api-key.")]
    MissingApiKey,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("page_size must be at least 1")]
    InvalidPageSize,

    #[error("timeout_secs must be at least 1")]
    InvalidTimeout,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

/// Contents of the optional config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Read a config file. A missing file yields the empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved connection settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Label Studio instance.
    pub url: String,
    pub api_key: String,
    /// Items requested per listing page.
    pub page_size: usize,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Load `.env`, the config file and the environment, then apply `overrides`.
    pub fn load(overrides: Overrides) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let path = config_path();
        let file = ConfigFile::load(&path)?;
        Self::resolve(overrides, |key| std::env::var(key).ok(), file)
    }

    /// Combine the sources in precedence order. `env` looks up one variable.
    pub fn resolve<F>(overrides: Overrides, env: F, file: ConfigFile) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let url = non_empty(overrides.url)
            .or_else(|| non_empty(env(URL_ENV)))
            .or_else(|| non_empty(file.url))
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let api_key = non_empty(overrides.api_key)
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .or_else(|| non_empty(file.api_key))
            .ok_or(ConfigError::MissingApiKey)?;

        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(Self {
            url,
            api_key,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lsx")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config =
            Config::resolve(Overrides::default(), env(&[(API_KEY_ENV, "k")]), ConfigFile::default())
                .unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::resolve(Overrides::default(), env(&[]), ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains(API_KEY_ENV));
        assert!(err.to_string().contains("--api-key"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Config::resolve(
            Overrides {
                url: None,
                api_key: Some("  ".into()),
            },
            env(&[(API_KEY_ENV, "")]),
            ConfigFile::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn flags_beat_env_beat_file() {
        let file = ConfigFile {
            url: Some("http://file".into()),
            api_key: Some("file-key".into()),
            page_size: Some(25),
            timeout_secs: Some(5),
        };

        let config = Config::resolve(
            Overrides {
                url: Some("http://flag".into()),
                api_key: None,
            },
            env(&[(URL_ENV, "http://env"), (API_KEY_ENV, "env-key")]),
            file.clone(),
        )
        .unwrap();
        assert_eq!(config.url, "http://flag");
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config = Config::resolve(Overrides::default(), env(&[]), file).unwrap();
        assert_eq!(config.url, "http://file");
        assert_eq!(config.api_key, "file-key");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let file = ConfigFile {
            api_key: Some("k".into()),
            page_size: Some(0),
            ..ConfigFile::default()
        };
        let err = Config::resolve(Overrides::default(), env(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let file = ConfigFile {
            api_key: Some("k".into()),
            timeout_secs: Some(0),
            ..ConfigFile::default()
        };
        let err = Config::resolve(Overrides::default(), env(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn parse_config_file() {
        let file: ConfigFile = toml::from_str(
            r#"
url = "https://ls.example.com"
api_key = "abc"
page_size = 10
"#,
        )
        .unwrap();
        assert_eq!(file.url.as_deref(), Some("https://ls.example.com"));
        assert_eq!(file.api_key.as_deref(), Some("abc"));
        assert_eq!(file.page_size, Some(10));
        assert_eq!(file.timeout_secs, None);
    }

    #[test]
    fn missing_config_file_is_empty() {
        let path = std::env::temp_dir().join("lsx-test-does-not-exist").join("config.toml");
        let file = ConfigFile::load(&path).unwrap();
        assert!(file.url.is_none() && file.api_key.is_none());
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("lsx-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "page_size = \"many\"").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
