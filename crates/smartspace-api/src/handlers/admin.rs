//! Admin handlers: action import and full listing.

use axum::Json;
use axum::extract::{Path, Query, State};

use smartspace_core::types::key::UserKey;
use smartspace_entity::action::ActionEntity;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// POST /smartspace/admin/actions/{admin_smartspace}/{admin_email}
pub async fn import_actions(
    State(state): State<AppState>,
    Path((admin_smartspace, admin_email)): Path<(String, String)>,
    Json(actions): Json<Vec<ActionEntity>>,
) -> Result<Json<ApiResponse<Vec<ActionEntity>>>, ApiError> {
    let imported = state
        .action_service
        .store(&admin_smartspace, &admin_email, actions)
        .await?;
    Ok(Json(ApiResponse::ok(imported)))
}

/// GET /smartspace/admin/actions/{admin_smartspace}/{admin_email}
pub async fn list_actions(
    State(state): State<AppState>,
    Path((admin_smartspace, admin_email)): Path<(String, String)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<ActionEntity>>>, ApiError> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let key = UserKey::new(admin_email, admin_smartspace).to_string();
    let actions = state
        .action_service
        .get_action_using_pagination(&key, page)
        .await?;
    Ok(Json(ApiResponse::ok(actions)))
}
