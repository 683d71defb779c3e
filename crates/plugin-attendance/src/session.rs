//! Lookup of a player's latest attendance actions.

use smartspace_core::result::AppResult;
use smartspace_core::types::pagination::PageRequest;
use smartspace_core::types::sorting::SortField;
use smartspace_database::store::{ActionStore, SORT_CREATED};
use smartspace_entity::action::{ActionEntity, CHECK_IN, CHECK_OUT};

/// Most recent action of exactly `action_type` performed by `email`.
pub async fn latest(
    actions: &dyn ActionStore,
    email: &str,
    action_type: &str,
) -> AppResult<Option<ActionEntity>> {
    let found = actions
        .read_with_type_containing_and_email(
            &SortField::desc(SORT_CREATED),
            email,
            action_type,
            PageRequest::unpaged(),
        )
        .await?;
    Ok(found.into_iter().find(|a| a.action_type == action_type))
}

/// The check-in of `email` that is still open, if any.
///
/// A check-in is open when it carries no `CheckOut` marker and no check-out
/// was recorded after it.
pub async fn open_check_in(
    actions: &dyn ActionStore,
    email: &str,
) -> AppResult<Option<ActionEntity>> {
    let Some(check_in) = latest(actions, email, CHECK_IN).await? else {
        return Ok(None);
    };
    if check_in.is_checked_out() {
        return Ok(None);
    }

    let closed = latest(actions, email, CHECK_OUT)
        .await?
        .is_some_and(|out| out.creation_timestamp > check_in.creation_timestamp);
    Ok((!closed).then_some(check_in))
}
