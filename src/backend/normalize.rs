//! Status payload normalization
//!
//! The backend reports job status in one of two shapes: a bare JSON string
//! ("Processing your video...") or a structured object with optional
//! `status`, `file`, and URL fields. [`StatusPayload`] models both shapes
//! as a tagged union, and [`normalize`] resolves them into one canonical
//! [`JobReport`]. After normalization the status is always one of the four
//! vocabulary values.

use serde::Deserialize;

use crate::api::models::JobStatus;

/// The two response shapes the backend is known to produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusPayload {
    Structured(StatusObject),
    Text(String),
}

/// Structured status response. Every field is optional; the backend does
/// not hold a fixed contract with us.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusObject {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, rename = "videoUrl")]
    pub video_url_alt: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Canonical view of a job after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub status: JobStatus,
    pub video_url: Option<String>,
    pub error: Option<String>,
}

/// Resolve a backend payload into a [`JobReport`].
///
/// Bare strings carry no media location. Objects run their `status` string
/// through the same classifier as bare strings so values like "done" cannot
/// leak past the boundary, and their media URL is resolved against
/// `base_url` when only a relative `file` is present.
pub fn normalize(payload: StatusPayload, base_url: &str) -> JobReport {
    match payload {
        StatusPayload::Text(text) => JobReport {
            status: classify(&text),
            video_url: None,
            error: None,
        },
        StatusPayload::Structured(object) => {
            let status = object
                .status
                .as_deref()
                .map(classify)
                .unwrap_or(JobStatus::Pending);
            let video_url = resolve_media_url(&object, base_url);

            JobReport {
                status,
                video_url,
                error: object.error,
            }
        }
    }
}

/// Case-insensitive substring classification into the fixed vocabulary.
pub fn classify(raw: &str) -> JobStatus {
    let lowered = raw.to_ascii_lowercase();
    if lowered.contains("complete") {
        JobStatus::Completed
    } else if lowered.contains("process") {
        JobStatus::Processing
    } else if lowered.contains("fail") {
        JobStatus::Failed
    } else {
        JobStatus::Pending
    }
}

/// Absolute URL fields win, in a fixed order; a relative `file` is joined
/// onto the base URL otherwise.
fn resolve_media_url(object: &StatusObject, base_url: &str) -> Option<String> {
    for candidate in [&object.video_url, &object.video_url_alt, &object.url] {
        if let Some(url) = candidate
            && !url.is_empty()
        {
            return Some(url.clone());
        }
    }

    object
        .file
        .as_deref()
        .filter(|file| !file.is_empty())
        .map(|file| join_media_url(base_url, file))
}

/// Join a base URL and a file path with exactly one separator between them.
pub fn join_media_url(base_url: &str, file: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        file.strip_prefix('/').unwrap_or(file)
    )
}
