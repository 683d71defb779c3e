//! Action entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use smartspace_core::types::key::{ActionKey, ElementKey, UserKey};

/// Action type that opens an attendance session.
pub const CHECK_IN: &str = "CheckIn";

/// Action type that closes an attendance session. The same string is used
/// as the `moreAttributes` marker of a check-in that is already closed.
pub const CHECK_OUT: &str = "CheckOut";

/// An event performed by a user against an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntity {
    /// Identifier, unique within the originating smartspace. Empty until
    /// the store assigns one.
    #[serde(default)]
    pub action_id: String,
    /// Smartspace that created the action.
    #[serde(default)]
    pub action_smartspace: String,
    /// Free-text category; selects the plugin on invocation.
    #[serde(default)]
    pub action_type: String,
    /// Email of the acting user.
    #[serde(default)]
    pub player_email: String,
    /// Smartspace of the acting user.
    #[serde(default)]
    pub player_smartspace: String,
    /// Target element identifier.
    #[serde(default)]
    pub element_id: String,
    /// Target element smartspace.
    #[serde(default)]
    pub element_smartspace: String,
    /// When the action was performed.
    #[serde(default = "Utc::now")]
    pub creation_timestamp: DateTime<Utc>,
    /// Plugin- or query-specific payload.
    #[sqlx(json)]
    #[serde(default)]
    pub more_attributes: Map<String, Value>,
}

impl ActionEntity {
    /// Create an unsaved action of `action_type` by a player on an element.
    pub fn new(action_type: impl Into<String>, player: &UserKey, element: &ElementKey) -> Self {
        use smartspace_core::types::key::CompositeKey;

        Self {
            action_id: String::new(),
            action_smartspace: String::new(),
            action_type: action_type.into(),
            player_email: player.id().to_string(),
            player_smartspace: player.smartspace().to_string(),
            element_id: element.id().to_string(),
            element_smartspace: element.smartspace().to_string(),
            creation_timestamp: Utc::now(),
            more_attributes: Map::new(),
        }
    }

    /// Set a `moreAttributes` entry.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.more_attributes.insert(name.into(), value.into());
        self
    }

    /// Set the creation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.creation_timestamp = timestamp;
        self
    }

    /// The composite key `actionId#actionSmartspace`.
    pub fn key(&self) -> ActionKey {
        ActionKey::new(&self.action_id, &self.action_smartspace)
    }

    /// The composite key of the acting user.
    pub fn player_key(&self) -> UserKey {
        UserKey::new(&self.player_email, &self.player_smartspace)
    }

    /// The composite key of the target element.
    pub fn element_key(&self) -> ElementKey {
        ElementKey::new(&self.element_id, &self.element_smartspace)
    }

    /// Whether this check-in was closed on arrival.
    pub fn is_checked_out(&self) -> bool {
        self.more_attributes.contains_key(CHECK_OUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ActionEntity {
        ActionEntity::new(
            CHECK_IN,
            &UserKey::new("bob@x", "local"),
            &ElementKey::new("7", "local"),
        )
    }

    #[test]
    fn test_keys() {
        let mut action = sample();
        action.action_id = "42".to_string();
        action.action_smartspace = "local".to_string();
        assert_eq!(action.key().to_string(), "42#local");
        assert_eq!(action.player_key().to_string(), "bob@x#local");
        assert_eq!(action.element_key().to_string(), "7#local");
    }

    #[test]
    fn test_checked_out_marker() {
        assert!(!sample().is_checked_out());
        assert!(sample().with_attribute(CHECK_OUT, true).is_checked_out());
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let action: ActionEntity = serde_json::from_value(serde_json::json!({
            "actionType": "Echo",
            "playerEmail": "bob@x",
            "playerSmartspace": "remote",
            "elementId": "1",
            "elementSmartspace": "remote",
            "moreAttributes": { "note": "hi" }
        }))
        .expect("deserialize");
        assert_eq!(action.action_type, "Echo");
        assert!(action.action_id.is_empty());
        assert_eq!(action.more_attributes["note"], "hi");
    }
}
