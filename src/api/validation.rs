//! Request validation helpers
//!
//! Pure, stateless checks applied before any backend call is made: the
//! submission content type, body size, and the source-URL shape.

use thiserror::Error;

use crate::api::error::ApiError;

#[derive(Debug, Error)]
pub enum SourceUrlError {
    #[error("url must be an absolute http or https URL")]
    NotHttp,
    #[error("url host is not a recognized video host")]
    UnknownHost,
    #[error("url does not reference a video")]
    MissingVideoId,
}

/// Shape check for submitted source URLs.
///
/// Accepts YouTube watch URLs, shorts URLs, and youtu.be short links;
/// everything else is rejected so no backend call is ever made for input
/// the backend cannot process.
pub fn validate_source_url(raw: &str) -> Result<(), SourceUrlError> {
    let url = reqwest::Url::parse(raw).map_err(|_| SourceUrlError::NotHttp)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SourceUrlError::NotHttp);
    }

    let host = url
        .host_str()
        .ok_or(SourceUrlError::NotHttp)?
        .to_ascii_lowercase();

    match host.as_str() {
        "youtu.be" => {
            let id = url.path().trim_matches('/');
            if id.is_empty() {
                Err(SourceUrlError::MissingVideoId)
            } else {
                Ok(())
            }
        }
        "youtube.com" | "www.youtube.com" | "m.youtube.com" => {
            if url.path() == "/watch" {
                let has_video_id = url
                    .query_pairs()
                    .any(|(key, value)| key == "v" && !value.is_empty());
                if has_video_id {
                    Ok(())
                } else {
                    Err(SourceUrlError::MissingVideoId)
                }
            } else if let Some(id) = url.path().strip_prefix("/shorts/") {
                if id.trim_matches('/').is_empty() {
                    Err(SourceUrlError::MissingVideoId)
                } else {
                    Ok(())
                }
            } else {
                Err(SourceUrlError::MissingVideoId)
            }
        }
        _ => Err(SourceUrlError::UnknownHost),
    }
}

/// Parses and validates Content-Type header for application/json
pub fn parse_content_type(content_type: &str) -> Result<mime::Mime, ApiError> {
    let media_type: mime::Mime = content_type.parse().map_err(|_| {
        ApiError::InvalidPayload(format!("invalid Content-Type: {}", content_type))
    })?;

    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        return Err(ApiError::InvalidPayload(format!(
            "Content-Type must be application/json, got: {}/{}",
            media_type.type_(),
            media_type.subtype()
        )));
    }

    Ok(media_type)
}

/// Validates that body size does not exceed the maximum allowed size
pub fn validate_body_size(data: &[u8], max_size: usize) -> Result<(), ApiError> {
    if data.len() > max_size {
        return Err(ApiError::PayloadTooLarge(data.len()));
    }
    Ok(())
}
