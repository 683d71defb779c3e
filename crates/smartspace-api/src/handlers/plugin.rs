//! Plugin listing handler.

use axum::Json;
use axum::extract::State;

use smartspace_plugin::PluginInfo;

use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// GET /smartspace/plugins
pub async fn list_plugins(State(state): State<AppState>) -> Json<ApiResponse<Vec<PluginInfo>>> {
    Json(ApiResponse::ok(state.plugins.list().await))
}
