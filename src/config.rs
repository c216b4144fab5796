//! Configuration management for the Life Harness client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for the Life Harness client
///
/// This structure holds all configuration needed by the client,
/// including the API connection settings and output preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API connection configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Life Harness API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for API requests (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default path for the exported autobiography markdown file
    #[serde(default = "default_autobiography_path")]
    pub autobiography_path: String,
}

fn default_autobiography_path() -> String {
    "my-autobiography.md".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            autobiography_path: default_autobiography_path(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment overrides
    ///
    /// A missing config file is not an error; defaults are used so the
    /// client works out of the box against a local server.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| HarnessError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("LIFEHARNESS_API_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("LIFEHARNESS_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid LIFEHARNESS_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(HarnessError::Config("api.base_url cannot be empty".to_string()).into());
        }

        Url::parse(&self.api.base_url).map_err(|e| {
            HarnessError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(HarnessError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.output.autobiography_path.is_empty() {
            return Err(HarnessError::Config(
                "output.autobiography_path cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_config_file(contents: &str) -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("failed to create tempdir");
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, contents).expect("failed to write config file");
        let path = config_path.to_string_lossy().to_string();
        (temp_dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_seconds, 120);
        assert_eq!(config.output.autobiography_path, "my-autobiography.md");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/a/config.yaml").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
api:
  base_url: "https://harness.example.com/api"
  timeout_seconds: 30
"#;
        let (_tmp, path) = temp_config_file(yaml);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://harness.example.com/api");
        assert_eq!(config.api.timeout_seconds, 30);
        // Unspecified sections fall back to their defaults
        assert_eq!(config.output.autobiography_path, "my-autobiography.md");
    }

    #[test]
    fn test_load_partial_file_defaults_fields() {
        let yaml = r#"
output:
  autobiography_path: "story.md"
"#;
        let (_tmp, path) = temp_config_file(yaml);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.output.autobiography_path, "story.md");
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let (_tmp, path) = temp_config_file("api: [not, a, mapping");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unparseable_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_autobiography_path() {
        let mut config = Config::default();
        config.output.autobiography_path = String::new();
        assert!(config.validate().is_err());
    }
}
