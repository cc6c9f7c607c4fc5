//! Health check handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub artifacts: String,
    pub started_at: DateTime<Utc>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Report whether the classifier and encoders loaded
    let (status, artifacts) = if state.forecaster.is_ready() {
        ("healthy", "loaded")
    } else {
        ("halted", "unavailable")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        artifacts: artifacts.to_string(),
        started_at: state.started_at,
    })
}
