//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HealthResponse, RootResponse};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        message: "StudyHub API is running".to_string(),
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let storage = match state.storage.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(provider = state.storage.provider_type(), error = %e, "Storage health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if database && storage { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database { "connected" } else { "unreachable" }.to_string(),
        storage: if storage { "available" } else { "unavailable" }.to_string(),
    })
}
