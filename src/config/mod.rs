//! Configuration management for clipgate
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `CLIPGATE__<section>__<key>`
//!
//! Examples:
//! - `CLIPGATE__BACKEND__BASE_URL=http://render-farm:8000`
//! - `CLIPGATE__HISTORY__QUERY_TIMEOUT_MS=500`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/clipgate.toml`.
//! This can be overridden using the `CLIPGATE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{ApiLimits, AuthConfig, BackendConfig, Config, HistoryConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`CLIPGATE__*`)
    /// 2. TOML file (default: `config/clipgate.toml`)
    /// 3. Default values
    ///
    /// Validation runs eagerly: a malformed backend URL or an unset session
    /// token aborts startup instead of surfacing mid-request.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[backend]
base_url = "http://render-farm:8000"

[auth]
session_token = "secret"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.backend.base_url, "http://render-farm:8000");
        assert_eq!(config.auth.session_token, "secret");
        assert_eq!(config.history.default_limit, 20);
    }

    #[test]
    fn test_validation_catches_missing_token() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[backend]
base_url = "http://render-farm:8000"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::MissingSessionToken)
        ));
    }

    #[test]
    fn test_validation_catches_bad_backend_url() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[backend]
base_url = "render-farm:8000"

[auth]
session_token = "secret"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidBackendUrl(_))
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[backend]
base_url = "https://shorts.internal.example.com"
user_agent = "clipgate/test"

[auth]
session_token = "secret"

[history]
path = "data/test-history"
query_timeout_ms = 750
default_limit = 10
max_limit = 40

[api]
max_payload_bytes = 32768
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(
            config.backend.base_url,
            "https://shorts.internal.example.com"
        );
        assert_eq!(config.backend.user_agent, "clipgate/test");
        assert_eq!(config.history.query_timeout_ms, 750);
        assert_eq!(config.history.default_limit, 10);
        assert_eq!(config.history.max_limit, 40);
        assert_eq!(config.api.max_payload_bytes, 32768);
    }
}
