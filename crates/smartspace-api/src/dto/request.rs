//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use smartspace_core::types::key::{ElementKey, UserKey};
use smartspace_entity::action::ActionEntity;
use smartspace_entity::element::ElementEntity;
use smartspace_entity::user::{UserEntity, UserRole};

/// Action submitted for creation or invocation.
///
/// Field presence is checked by the action service, so every field
/// defaults to empty here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Action type.
    #[serde(rename = "type", default)]
    #[validate(length(max = 255))]
    pub action_type: String,
    /// Acting user's email.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub player_email: String,
    /// Acting user's smartspace.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub player_smartspace: String,
    /// Target element id.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub element_id: String,
    /// Target element smartspace.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub element_smartspace: String,
    /// Free-form payload.
    #[serde(default)]
    pub more_attributes: Map<String, Value>,
}

impl ActionRequest {
    /// Convert into an unsaved action.
    pub fn into_entity(self) -> ActionEntity {
        let mut action = ActionEntity::new(
            self.action_type,
            &UserKey::new(self.player_email, self.player_smartspace),
            &ElementKey::new(self.element_id, self.element_smartspace),
        );
        action.more_attributes = self.more_attributes;
        action
    }
}

/// User registration in the local smartspace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Avatar URL or emoji.
    #[serde(default)]
    #[validate(length(max = 512))]
    pub avatar: String,
    /// Role.
    pub role: UserRole,
}

impl CreateUserRequest {
    /// Convert into a user of `smartspace`.
    pub fn into_entity(self, smartspace: &str) -> UserEntity {
        let mut user = UserEntity::new(self.email, smartspace, self.username, self.role);
        user.avatar = self.avatar;
        user
    }
}

/// Element registration in the local smartspace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateElementRequest {
    /// Element name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Element type.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "Type is required"))]
    pub element_type: String,
    /// Creator email.
    #[validate(length(min = 1))]
    pub creator_email: String,
    /// Creator smartspace.
    #[validate(length(min = 1))]
    pub creator_smartspace: String,
    /// Location x coordinate.
    #[serde(default)]
    pub x: f64,
    /// Location y coordinate.
    #[serde(default)]
    pub y: f64,
    /// Free-form payload.
    #[serde(default)]
    pub more_attributes: Map<String, Value>,
}

impl CreateElementRequest {
    /// Convert into an unsaved element.
    pub fn into_entity(self, smartspace: &str) -> ElementEntity {
        let mut element = ElementEntity::new(
            smartspace,
            self.name,
            self.element_type,
            self.creator_email,
            self.creator_smartspace,
        );
        element.location.x = self.x;
        element.location.y = self.y;
        element.more_attributes = self.more_attributes;
        element
    }
}

/// `?email=&type=` filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeQuery {
    /// Player email.
    pub email: String,
    /// Action type (substring match).
    #[serde(rename = "type")]
    pub action_type: String,
}

/// `?email=` filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    /// Player email.
    pub email: String,
}

/// Window bounded by the timestamps of two actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryWindowQuery {
    /// Player email.
    pub email: String,
    /// Action type (exact match).
    #[serde(rename = "type")]
    pub action_type: String,
    /// Id of the action whose timestamp starts the window.
    pub from: String,
    /// Id of the action whose timestamp ends the window; `empty` or absent
    /// means now.
    pub to: Option<String>,
    /// Smartspace of both boundary actions; defaults to the local one.
    pub smartspace: Option<String>,
}

/// Manager listing filter, optionally bounded in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerQuery {
    /// Action type (exact match).
    #[serde(rename = "type")]
    pub action_type: String,
    /// Window start.
    pub from: Option<DateTime<Utc>>,
    /// Window end.
    pub to: Option<DateTime<Utc>>,
}
