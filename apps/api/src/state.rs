use std::sync::Arc;

use crate::config::Config;
use crate::enrichment::Enricher;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis record persistence. Default: `SqliteAnalysisStore`.
    pub store: Arc<dyn AnalysisStore>,
    /// Optional AI enrichment. `DisabledEnricher` when no API key is configured.
    pub enricher: Arc<dyn Enricher>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// In-memory SQLite store, enrichment disabled, default config.
    pub async fn for_tests() -> (Self, sqlx::SqlitePool) {
        let pool = crate::db::memory_pool().await;
        let state = Self {
            store: Arc::new(crate::store::SqliteAnalysisStore::new(pool.clone())),
            enricher: Arc::new(crate::enrichment::DisabledEnricher),
            config: Config::for_tests(),
        };
        (state, pool)
    }
}
