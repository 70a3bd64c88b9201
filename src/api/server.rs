use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    auth::require_session,
    services::{fetch_media, health, job_status, recent_history, submit_job},
    state::AppState,
};
use crate::backend::BackendClient;
use crate::config::Config;
use crate::history::HistoryStore;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(address: SocketAddr) -> Result<(), AnyError> {
    // Load config
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    info!(base_url = %config.backend.base_url, "Building backend client");
    let backend = BackendClient::new(&config.backend)
        .map_err(|e| format!("Failed to build backend client: {}", e))?;

    info!(path = %config.history.path.display(), "Opening history store");
    let history = HistoryStore::open(&config.history.path)
        .map_err(|e| format!("Failed to open history store: {}", e))?;

    let state = AppState::new(config, backend, history);
    let app = router(state.clone());

    let listener = TcpListener::bind(address).await?;
    info!(%address, "clipgate API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush pending history writes before the process exits
    state
        .history
        .persist()
        .map_err(|e| format!("Failed to persist history store: {}", e))?;

    Ok(())
}

/// Build the full router. The session-gated routes and the open health
/// route are assembled separately so the gate never applies to /health.
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/jobs", post(submit_job))
        .route("/jobs/status", get(job_status))
        .route("/media", get(fetch_media))
        .route("/history", get(recent_history))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(gated)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
