//! Route definitions for the rain forecast server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Form description for clients that render their own inputs
        .route("/form", get(handlers::get_form_schema))
        // JSON forecast
        .route("/predict", post(handlers::predict))
}

/// Browser-facing page routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::show_form))
        .route("/predict", post(handlers::submit_form))
}
