//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db {
        None => "memory",
        Some(db) => match db.health_check().await {
            Ok(true) => "connected",
            Ok(false) => "unreachable",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "unreachable"
            }
        },
    };
    let status = if database == "unreachable" {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}
