use bytes::Bytes;
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::normalize::StatusPayload;
use crate::config::BackendConfig;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend rejected the request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("backend accepted the job but returned no job id")]
    MissingJobId,

    #[error("backend request failed: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Binary media resource fetched from the backend
#[derive(Debug)]
pub struct MediaPayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// HTTP client for the remote job-processing service. Stateless: every
/// method is a single request against the configured base URL, no retries.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a backend-relative path onto the base URL, stripping a single
    /// leading separator so no double slash appears.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.strip_prefix('/').unwrap_or(path))
    }

    /// Submit a source URL for generation and extract the assigned job id.
    ///
    /// The backend answers with either a bare string id or an object
    /// carrying the id under `job_id` or `jobId`; both spellings are
    /// accepted. A success response with no extractable id is its own
    /// error, distinct from a backend-reported rejection.
    pub async fn submit(&self, source_url: &str) -> Result<String> {
        debug!(source_url, "Submitting generation job");

        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&serde_json::json!({ "url": source_url }))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                status,
                message: extract_error_message(&body),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let job_id = extract_job_id(&payload).ok_or(BackendError::MissingJobId)?;
        debug!(job_id, "Job accepted by backend");
        Ok(job_id)
    }

    /// Query job status. Returns the payload still in its backend shape;
    /// callers run it through [`normalize`](super::normalize::normalize).
    pub async fn status(&self, job_id: &str) -> Result<StatusPayload> {
        let response = self
            .http
            .get(format!("{}/status/{}", self.base_url, job_id))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                status,
                message: extract_error_message(&body),
            });
        }

        response
            .json::<StatusPayload>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }

    /// Fetch a media resource by backend-relative path.
    pub async fn fetch_media(&self, path: &str) -> Result<MediaPayload> {
        let url = self.absolute_url(path);
        debug!(%url, "Fetching media from backend");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status,
                message: format!("backend returned {}", status),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        debug!(size = bytes.len(), "Media fetch completed");
        Ok(MediaPayload {
            bytes,
            content_type,
            content_length,
        })
    }

    /// Unauthenticated reachability probe against the backend root.
    pub async fn ping(&self) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status,
                message: format!("backend returned {}", status),
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}

/// Pull a job id out of a loosely-typed submission response.
fn extract_job_id(payload: &Value) -> Option<String> {
    match payload {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Object(fields) => ["job_id", "jobId"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .filter(|id| !id.is_empty())
            .map(str::to_owned),
        _ => None,
    }
}

/// Best-effort human-readable message from an error body: JSON fields
/// first, raw text as the fallback.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "backend request failed".to_string()
    } else {
        trimmed.to_string()
    }
}
