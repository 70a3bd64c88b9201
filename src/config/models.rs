use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub api: ApiLimits,
}

/// Remote video-generation backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend; the single source for every outbound call
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_user_agent() -> String {
    concat!("clipgate/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Session gate configuration
///
/// The token has no default and is validated non-empty at startup. It can
/// also be supplied via the `CLIPGATE_SESSION_TOKEN` environment variable so
/// it never has to live in a config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub session_token: String,
}

/// Submission history store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    /// Upper bound on a single listing read; reads past it fail open
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
    #[serde(default = "default_history_limit")]
    pub default_limit: usize,
    #[serde(default = "default_history_max_limit")]
    pub max_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            query_timeout_ms: default_query_timeout_ms(),
            default_limit: default_history_limit(),
            max_limit: default_history_max_limit(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data/history")
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_history_limit() -> usize {
    20
}

fn default_history_max_limit() -> usize {
    100
}

/// API request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLimits {
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_max_payload_bytes() -> usize {
    64 * 1024
}
