//! Player-facing action handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use smartspace_core::types::key::ActionKey;
use smartspace_entity::action::ActionEntity;

use crate::dto::request::{ActionRequest, BoundaryWindowQuery, EmailQuery, TypeQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{PaginationParams, validated};
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// POST /smartspace/actions
pub async fn invoke(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> ApiResult<ActionEntity> {
    let req = validated(req)?;
    let action = state.action_service.invoke(req.into_entity()).await?;
    Ok(Json(ApiResponse::ok(action)))
}

/// POST /smartspace/actions/new
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> ApiResult<ActionEntity> {
    let req = validated(req)?;
    let action = state.action_service.new_action(req.into_entity()).await?;
    Ok(Json(ApiResponse::ok(action)))
}

/// DELETE /smartspace/actions/{smartspace}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((smartspace, id)): Path<(String, String)>,
) -> ApiResult<String> {
    let key = ActionKey::new(id, smartspace);
    state.action_service.delete_by_key(&key).await?;
    Ok(Json(ApiResponse::ok(key.to_string())))
}

/// GET /smartspace/actions/latest?email=&type=
pub async fn latest(
    State(state): State<AppState>,
    Query(filter): Query<TypeQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Option<ActionEntity>> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let action = state
        .action_service
        .get_action_by_type_and_email(page, &filter.email, &filter.action_type)
        .await?;
    Ok(Json(ApiResponse::ok(action)))
}

/// GET /smartspace/actions/by-type?email=&type=
pub async fn by_type(
    State(state): State<AppState>,
    Query(filter): Query<TypeQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Option<Vec<ActionEntity>>> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let actions = state
        .action_service
        .get_actions_list_by_type(page, &filter.email, &filter.action_type)
        .await?;
    Ok(Json(ApiResponse::ok(actions)))
}

/// GET /smartspace/actions/session?email=
pub async fn session(
    State(state): State<AppState>,
    Query(filter): Query<EmailQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<ActionEntity>> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let actions = state
        .action_service
        .get_all_actions_between_check_in_and_check_out_by_time(page, &filter.email)
        .await?;
    Ok(Json(ApiResponse::ok(actions)))
}

/// GET /smartspace/actions/window?email=&type=&from=&to=&smartspace=
pub async fn window(
    State(state): State<AppState>,
    Query(filter): Query<BoundaryWindowQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<ActionEntity>> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let smartspace = filter
        .smartspace
        .as_deref()
        .unwrap_or(state.local_smartspace());
    let actions = state
        .action_service
        .get_actions_list_by_time_stamp_and_type(
            page,
            &filter.email,
            &filter.action_type,
            &filter.from,
            filter.to.as_deref(),
            smartspace,
        )
        .await?;
    Ok(Json(ApiResponse::ok(actions)))
}
