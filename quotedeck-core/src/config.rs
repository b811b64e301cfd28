//! Resolver configuration: TOML file with environment overrides.
//!
//! All fields have working defaults; a config file is optional. The Alpha
//! Vantage key can come from `QUOTEDECK_API_KEY` or `ALPHAVANTAGE_API_KEY`
//! (the env var wins over the file). A missing key is not an error here —
//! the primary provider reports it per-fetch and the resolver falls through
//! to Yahoo Finance.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Alpha Vantage API key.
    pub api_key: Option<String>,

    /// Primary-provider attempt limit (>= 1).
    pub max_primary_attempts: u32,

    /// Per-request transport timeout, in seconds.
    pub request_timeout_secs: u64,

    /// Backoff time unit: attempt `i` is followed by a `2^i`-unit wait.
    pub backoff_base_secs: u64,

    /// Freshness window of the in-memory memo, in seconds.
    pub memo_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            max_primary_attempts: 3,
            request_timeout_secs: 15,
            backoff_base_secs: 1,
            memo_ttl_secs: 60,
        }
    }
}

impl Config {
    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment wins over the file for the API key.
    fn apply_env(&mut self) {
        let from_env = std::env::var("QUOTEDECK_API_KEY")
            .or_else(|_| std::env::var("ALPHAVANTAGE_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if from_env.is_some() {
            self.api_key = from_env;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.max_primary_attempts, 3);
        assert_eq!(c.request_timeout_secs, 15);
        assert_eq!(c.backoff_base_secs, 1);
        assert_eq!(c.memo_ttl_secs, 60);
        assert!(c.api_key.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let c: Config = toml::from_str(
            r#"
            api_key = "demo"
            max_primary_attempts = 5
            "#,
        )
        .unwrap();
        assert_eq!(c.api_key.as_deref(), Some("demo"));
        assert_eq!(c.max_primary_attempts, 5);
        // Unspecified fields keep their defaults.
        assert_eq!(c.memo_ttl_secs, 60);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn missing_file_is_read_error() {
        let missing = Path::new("/nonexistent/quotedeck.toml");
        assert!(matches!(
            Config::from_file(missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
