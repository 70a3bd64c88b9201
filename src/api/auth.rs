use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::{error::ApiError, state::AppState};

/// Session gate applied to every route except the health check.
///
/// Stands in for the hosted identity provider at the boundary: requests
/// must present the configured session token as a bearer credential, and a
/// missing or mismatched token is a 401 JSON error, never a silent pass.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());

    match token {
        Some(token) if token == state.config.auth.session_token => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}
