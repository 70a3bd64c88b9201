use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("backend.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBackendUrl(String),

    #[error("auth.session_token must be set (config file or CLIPGATE_SESSION_TOKEN)")]
    MissingSessionToken,

    #[error("history.query_timeout_ms must be greater than zero")]
    ZeroQueryTimeout,

    #[error("history.default_limit ({0}) exceeds history.max_limit ({1})")]
    LimitsOutOfOrder(usize, usize),

    #[error("api.max_payload_bytes must be greater than zero")]
    ZeroPayloadLimit,
}

/// Eager startup validation. Everything here would otherwise fail at an
/// arbitrary call site mid-request.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    let base_url = &config.backend.base_url;
    let parsed = reqwest::Url::parse(base_url)
        .map_err(|_| ValidationError::InvalidBackendUrl(base_url.clone()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidBackendUrl(base_url.clone()));
    }

    if config.auth.session_token.trim().is_empty() {
        return Err(ValidationError::MissingSessionToken);
    }

    if config.history.query_timeout_ms == 0 {
        return Err(ValidationError::ZeroQueryTimeout);
    }

    if config.history.default_limit > config.history.max_limit {
        return Err(ValidationError::LimitsOutOfOrder(
            config.history.default_limit,
            config.history.max_limit,
        ));
    }

    if config.api.max_payload_bytes == 0 {
        return Err(ValidationError::ZeroPayloadLimit);
    }

    Ok(())
}
