//! Liveness endpoint backed by a database ping.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.products.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        warn!("Health check failed: database unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}
