//! Element registration handlers.

use axum::Json;
use axum::extract::{Path, State};

use smartspace_core::types::key::ElementKey;
use smartspace_entity::element::ElementEntity;

use crate::dto::request::CreateElementRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::validated;
use crate::state::AppState;

/// POST /smartspace/elements
pub async fn create_element(
    State(state): State<AppState>,
    Json(req): Json<CreateElementRequest>,
) -> Result<Json<ApiResponse<ElementEntity>>, ApiError> {
    let req = validated(req)?;
    let element = state
        .element_service
        .create_element(req.into_entity(state.local_smartspace()))
        .await?;
    Ok(Json(ApiResponse::ok(element)))
}

/// GET /smartspace/elements/{smartspace}/{id}
pub async fn get_element(
    State(state): State<AppState>,
    Path((smartspace, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ElementEntity>>, ApiError> {
    let element = state
        .element_service
        .get_element(&ElementKey::new(id, smartspace))
        .await?;
    Ok(Json(ApiResponse::ok(element)))
}
