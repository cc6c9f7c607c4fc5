//! Rain Forecast - Backend Server
//!
//! Serves a single-page weather form, encodes the submitted categorical
//! fields, runs the pre-trained classifier and shows whether it will rain
//! tomorrow.

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod artifacts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;

use artifacts::{ArtifactError, Artifacts};
use services::{Forecaster, Presenter, IMAGE_ROUTE};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forecaster: Forecaster,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state from the outcome of loading artifacts. A load failure does
    /// not stop the server; it halts forecasting and every page shows why.
    pub fn new(config: Config, artifacts: Result<Artifacts, ArtifactError>) -> Self {
        let presenter = Presenter::new(&config.presentation);
        Self {
            forecaster: Forecaster::from_artifacts(artifacts, presenter),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let images = ServeDir::new(&state.config.presentation.image_dir);

    Router::new()
        .merge(routes::page_routes())
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .nest_service(IMAGE_ROUTE, images)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
