use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "diagnostic-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: at least one configured model must answer.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.generator.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
