//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, store) = if !state.stores.is_persistent() {
        ("ok", "memory")
    } else if state.stores.health_check().await.is_ok() {
        ("ok", "connected")
    } else {
        ("degraded", "unavailable")
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        smartspace: state.local_smartspace().to_string(),
        store: store.to_string(),
    }))
}
