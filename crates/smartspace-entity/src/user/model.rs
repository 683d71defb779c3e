//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use smartspace_core::types::key::UserKey;

use super::role::UserRole;

/// A registered user of some smartspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// Email address; unique within the user's smartspace.
    pub user_email: String,
    /// Smartspace the user belongs to.
    pub user_smartspace: String,
    /// Display name.
    pub username: String,
    /// Avatar URL or emoji.
    #[serde(default)]
    pub avatar: String,
    /// User role.
    pub role: UserRole,
    /// Accumulated points.
    #[serde(default)]
    pub points: i64,
}

impl UserEntity {
    /// Create a user with zero points and no avatar.
    pub fn new(
        email: impl Into<String>,
        smartspace: impl Into<String>,
        username: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            user_email: email.into(),
            user_smartspace: smartspace.into(),
            username: username.into(),
            avatar: String::new(),
            role,
            points: 0,
        }
    }

    /// The composite key `email#smartspace`.
    pub fn key(&self) -> UserKey {
        UserKey::new(&self.user_email, &self.user_smartspace)
    }
}
