use std::time::Duration;

use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    error::ApiError,
    models::{
        HealthResponse, HistoryEntry, HistoryResponse, JobStatus, StatusResponse, SubmitRequest,
        SubmitResponse,
    },
    state::AppState,
    validation,
};
use crate::backend::{BackendError, normalize};

const FALLBACK_MEDIA_TYPE: &str = "video/mp4";
const MEDIA_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Job submission endpoint (POST /jobs)
///
/// Validates the source URL shape before anything leaves the process, then
/// forwards it to the backend exactly once. Backend rejections pass through
/// with the backend's own status code; a success response with no
/// extractable job id is reported as our failure, not the backend's.
///
/// The accepted submission lands in the history store on a best-effort
/// basis: a history write failure is logged and never fails the request.
pub async fn submit_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::InvalidPayload("missing Content-Type header".into()))?;

    validation::parse_content_type(content_type)?;

    let body_bytes = read_body(body, state.config.api.max_payload_bytes).await?;
    let request: SubmitRequest = serde_json::from_slice(&body_bytes)?;

    validation::validate_source_url(&request.url)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    let job_id = match state.backend.submit(&request.url).await {
        Ok(job_id) => job_id,
        Err(error) => {
            state.metrics.job_rejected();
            return Err(map_backend_error(error));
        }
    };
    state.metrics.job_submitted();

    let entry = HistoryEntry {
        job_id: job_id.clone(),
        source_url: request.url.clone(),
        created_at: chrono::Utc::now(),
    };
    if let Err(error) = state.history.record(&entry) {
        warn!(%error, job_id = %entry.job_id, "Failed to record submission history");
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            job_id,
            url: request.url,
        }),
    ))
}

fn map_backend_error(error: BackendError) -> ApiError {
    match error {
        BackendError::Rejected { status, message } => ApiError::Upstream { status, message },
        BackendError::MissingJobId => {
            ApiError::Internal("backend accepted the job but returned no job id".into())
        }
        BackendError::Transport(message) => ApiError::Internal(message),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    #[serde(default, rename = "jobId")]
    pub job_id: Option<String>,
}

/// Job status endpoint (GET /jobs/status?jobId=...)
///
/// Exactly one backend request per call; the client owns the polling loop.
/// Backend failures come back as HTTP 200 with `status: "failed"` so a
/// poller only ever branches on the payload, never on the transport.
pub async fn job_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<StatusResponse>, ApiError> {
    let job_id = params
        .job_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidPayload("jobId query parameter is required".into()))?;

    state.metrics.status_checked();

    match state.backend.status(job_id).await {
        Ok(payload) => {
            let report = normalize::normalize(payload, state.backend.base_url());
            Ok(Json(StatusResponse {
                status: report.status,
                video_url: report.video_url,
                error: report.error,
            }))
        }
        Err(error) => {
            warn!(%error, job_id, "Backend status check failed");
            Ok(Json(StatusResponse {
                status: JobStatus::Failed,
                video_url: None,
                error: Some(error.to_string()),
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaParams {
    #[serde(default)]
    pub path: Option<String>,
}

/// Media proxy endpoint (GET /media?path=...)
///
/// Fetches the artifact from the backend and re-serves it with a long-lived
/// public cache directive. Any backend non-success collapses to 404; the
/// proxy does not distinguish "not generated yet" from other failures.
pub async fn fetch_media(
    State(state): State<AppState>,
    Query(params): Query<MediaParams>,
) -> Result<Response, ApiError> {
    let path = params
        .path
        .as_deref()
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ApiError::InvalidPayload("path query parameter is required".into()))?;

    let media = state.backend.fetch_media(path).await.map_err(|error| {
        debug!(%error, path, "Media fetch failed");
        ApiError::NotFound(format!("media at '{}'", path))
    })?;

    state.metrics.media_served(media.bytes.len() as u64);

    let content_type = media
        .content_type
        .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());
    let content_length = media.content_length.unwrap_or(media.bytes.len() as u64);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CACHE_CONTROL, MEDIA_CACHE_CONTROL)
        .body(Body::from(media.bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Health check endpoint (GET /health)
///
/// Unauthenticated. Reports backend reachability with the backend's own
/// root response attached; any failure is 503, never a panic.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let backend_url = state.backend.base_url().to_string();

    match state.backend.ping().await {
        Ok(body) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                backend: Some(body),
                backend_url,
                message: None,
            }),
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error".to_string(),
                backend: None,
                backend_url,
                message: Some(error.to_string()),
            }),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Submission history endpoint (GET /history?limit=...)
///
/// Reads fail open: a slow or broken store yields an empty listing with
/// HTTP 200, never an error, so a history view cannot take the rest of the
/// client down with it.
pub async fn recent_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let limit = params
        .limit
        .unwrap_or(state.config.history.default_limit)
        .min(state.config.history.max_limit);
    let timeout = Duration::from_millis(state.config.history.query_timeout_ms);

    let store = state.history.clone();
    let read = tokio::task::spawn_blocking(move || store.recent(limit));

    let entries = match tokio::time::timeout(timeout, read).await {
        Ok(Ok(Ok(entries))) => entries,
        Ok(Ok(Err(error))) => {
            warn!(%error, "History read failed; returning empty listing");
            Vec::new()
        }
        Ok(Err(join_error)) => {
            warn!(%join_error, "History read task failed; returning empty listing");
            Vec::new()
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "History read timed out; returning empty listing"
            );
            Vec::new()
        }
    };

    Json(HistoryResponse { entries })
}

/// Reads request body and validates size
async fn read_body(body: Body, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .to_bytes()
        .to_vec();

    validation::validate_body_size(&data, max_bytes)?;

    Ok(data)
}
