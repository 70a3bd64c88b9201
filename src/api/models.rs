//! API models for the clipgate gateway endpoints.
//!
//! Wire names follow the public contract the original clients already
//! depend on: the submission response carries `jobId` (camelCase), the
//! status response `video_url` (snake_case), and the health response
//! `backendUrl`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed status vocabulary exposed by the status endpoint.
///
/// `pending` and `processing` invite another poll; `completed` and `failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmitRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusResponse {
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<Value>,
    #[serde(rename = "backendUrl")]
    pub backend_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One accepted submission, as recorded by the history store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryEntry {
    pub job_id: String,
    pub source_url: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
