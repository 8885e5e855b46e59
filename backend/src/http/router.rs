//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The funnel is served from tenant domains, so any origin may call in.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/proposals", post(handlers::create_session))
        .route("/proposals/load", post(handlers::load_proposal))
        .route("/proposals/summary", post(handlers::proposal_summary))
        .route(
            "/proposals/{session_id}",
            get(handlers::get_session).delete(handlers::cancel_session),
        )
        .route(
            "/proposals/{session_id}/events",
            get(handlers::stream_session_events),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
