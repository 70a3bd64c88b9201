use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
    pub history: Arc<HistoryStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, backend: BackendClient, history: HistoryStore) -> Self {
        Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
            history: Arc::new(history),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
