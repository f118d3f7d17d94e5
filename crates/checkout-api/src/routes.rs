//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/v1/checkout/{gateway}/process - Run one checkout submission
/// - DELETE /api/v1/stored-payments/{record_name} - Remove a saved payment method
/// - GET  /api/v1/gateways - List registered gateways
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // The checkout form is served by the storefront, not this service
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/checkout/{gateway}/process",
            post(handlers::process_checkout),
        )
        .route(
            "/stored-payments/{record_name}",
            delete(handlers::delete_stored_payment),
        )
        .route("/gateways", get(handlers::list_gateways));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
