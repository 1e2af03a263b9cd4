//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_value_handler, health_handler, put_value_handler, read_cache_handler, read_db_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/read/cache", get(read_cache_handler))
        .route("/read/db", get(read_db_handler))
        .route("/cache/:key", get(get_value_handler).put(put_value_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
