//! Client Configuration
//!
//! Base URL, credentials and timeout, loaded from a JSON file and/or
//! environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const ENV_URL: &str = "AERODB_URL";
pub const ENV_API_KEY: &str = "AERODB_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "AERODB_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL (default: "http://localhost:54321")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whole-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    /// Defaults overridden by process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from `AERODB_*` variables found by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.parse().map_err(|_| {
                Error::config(format!("Invalid {}: {}", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:54321");
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url": "https://db.example.com"}}"#).unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "https://db.example.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ClientConfig::load(file.path()).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Config);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_URL, "https://prod.example.com"),
            (ENV_API_KEY, "sk_live"),
            (ENV_TIMEOUT_SECS, "5"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "https://prod.example.com");
        assert_eq!(config.api_key.as_deref(), Some("sk_live"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout_env() {
        let mut config = ClientConfig::default();
        let result = config.apply_env(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(result.is_err());
    }
}
