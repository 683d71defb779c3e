//! Manager handlers: smartspace-wide action listings.

use axum::Json;
use axum::extract::{Path, Query, State};

use smartspace_core::error::AppError;
use smartspace_entity::action::ActionEntity;

use crate::dto::request::ManagerQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// GET /smartspace/manager/actions/{manager_smartspace}/{manager_email}?type=[&from=&to=]
///
/// With both `from` and `to` the listing is limited to that window.
pub async fn list_actions(
    State(state): State<AppState>,
    Path((manager_smartspace, manager_email)): Path<(String, String)>,
    Query(filter): Query<ManagerQuery>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<Vec<ActionEntity>>>, ApiError> {
    let page = params.into_page_request(state.config.server.max_page_size);
    let service = &state.action_service;

    let actions = match (filter.from, filter.to) {
        (Some(from), Some(to)) => {
            service
                .get_all_actions_list_by_time_stamp_and_type(
                    page,
                    &manager_email,
                    &filter.action_type,
                    from,
                    to,
                    &manager_smartspace,
                )
                .await?
        }
        (None, None) => {
            service
                .get_all_actions_list_by_type(
                    page,
                    &manager_email,
                    &filter.action_type,
                    &manager_smartspace,
                )
                .await?
        }
        _ => {
            return Err(AppError::validation("Both 'from' and 'to' are required for a time window").into());
        }
    };

    Ok(Json(ApiResponse::ok(actions)))
}
