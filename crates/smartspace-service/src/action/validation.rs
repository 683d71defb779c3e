//! Reference validation shared by action creation and invocation.
//!
//! Checks are advisory: a user or element can disappear between the check
//! and the write that follows it.

use smartspace_database::store::{ElementStore, UserStore};
use smartspace_entity::action::ActionEntity;

use super::error::ActionError;

/// Whether a string field counts as present.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Require the five reference fields to be present.
pub fn check_fields(action: &ActionEntity) -> Result<(), ActionError> {
    let fields = [
        ("playerEmail", &action.player_email),
        ("playerSmartspace", &action.player_smartspace),
        ("elementId", &action.element_id),
        ("elementSmartspace", &action.element_smartspace),
        ("type", &action.action_type),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ActionError::ValidationFailed(format!(
            "missing {}",
            missing.join(", ")
        )))
    }
}

/// Require all fields to be present and both referenced entities to exist.
pub async fn validate(
    action: &ActionEntity,
    users: &dyn UserStore,
    elements: &dyn ElementStore,
) -> Result<(), ActionError> {
    check_fields(action)?;

    if users.read_by_id(&action.player_key()).await?.is_none() {
        return Err(ActionError::ValidationFailed(format!(
            "unknown player '{}'",
            action.player_key()
        )));
    }

    if elements.read_by_id(&action.element_key()).await?.is_none() {
        return Err(ActionError::ValidationFailed(format!(
            "unknown element '{}'",
            action.element_key()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_core::types::key::{ElementKey, UserKey};

    #[test]
    fn test_blank_fields_are_reported() {
        let action = ActionEntity::new(
            "  ",
            &UserKey::new("bob@x", "local"),
            &ElementKey::new("", "local"),
        );
        match check_fields(&action) {
            Err(ActionError::ValidationFailed(msg)) => {
                assert_eq!(msg, "missing elementId, type");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
