//! User registration handlers.

use axum::Json;
use axum::extract::{Path, State};

use smartspace_core::types::key::UserKey;
use smartspace_entity::user::UserEntity;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::validated;
use crate::state::AppState;

/// POST /smartspace/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserEntity>>, ApiError> {
    let req = validated(req)?;
    let user = state
        .user_service
        .create_user(req.into_entity(state.local_smartspace()))
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /smartspace/users/{smartspace}/{email}
pub async fn get_user(
    State(state): State<AppState>,
    Path((smartspace, email)): Path<(String, String)>,
) -> Result<Json<ApiResponse<UserEntity>>, ApiError> {
    let user = state
        .user_service
        .get_user(&UserKey::new(email, smartspace))
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}
