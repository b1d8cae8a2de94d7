mod analyses;
mod config;
mod db;
mod enrichment;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::enrichment::enricher_from_config;
use crate::matching::vocabulary::Vocabulary;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SqliteAnalysisStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the skill pattern registry up front instead of on the first request
    info!(skills = Vocabulary::global().len(), "Skill vocabulary loaded");

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(SqliteAnalysisStore::new(db));

    // Initialize enrichment (disabled without ANTHROPIC_API_KEY)
    let enricher = enricher_from_config(&config);

    let state = AppState {
        store,
        enricher,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
