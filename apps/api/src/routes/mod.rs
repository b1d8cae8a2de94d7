pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analyses::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analyses",
            get(handlers::handle_list_analyses).post(handlers::handle_create_analysis),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()) // TODO: restrict origins once the web front end has a fixed host
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
