//! User operations used by the CLI and the HTTP API.

use std::sync::Arc;

use tracing::info;

use smartspace_core::error::AppError;
use smartspace_core::types::key::UserKey;
use smartspace_core::types::pagination::PageRequest;
use smartspace_database::store::UserStore;
use smartspace_entity::user::UserEntity;

use crate::action::validation::is_present;

/// Registers and looks up users.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Register a user. Email, smartspace, and username are required.
    pub async fn create_user(&self, user: UserEntity) -> Result<UserEntity, AppError> {
        if !is_present(&user.user_email) || !is_present(&user.user_smartspace) {
            return Err(AppError::validation("User email and smartspace are required"));
        }
        if !user.user_email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if !is_present(&user.username) {
            return Err(AppError::validation("Username cannot be empty"));
        }

        let created = self.users.create(&user).await?;
        info!(user = %created.key(), role = %created.role, "User created");
        Ok(created)
    }

    /// Look up a user by key.
    pub async fn get_user(&self, key: &UserKey) -> Result<UserEntity, AppError> {
        self.users
            .read_by_id(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{key}' not found")))
    }

    /// List users ordered by key.
    pub async fn list_users(&self, page: PageRequest) -> Result<Vec<UserEntity>, AppError> {
        self.users.read_all(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_core::error::ErrorKind;
    use smartspace_database::Stores;
    use smartspace_entity::user::UserRole;

    #[tokio::test]
    async fn test_create_and_get() {
        let service = UserService::new(Stores::in_memory().users);
        let user = UserEntity::new("ann@x", "local", "ann", UserRole::Manager);
        service.create_user(user.clone()).await.unwrap();

        assert_eq!(service.get_user(&user.key()).await.unwrap(), user);
        let err = service
            .get_user(&UserKey::new("bob@x", "local"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_rejects_malformed_email() {
        let service = UserService::new(Stores::in_memory().users);
        let err = service
            .create_user(UserEntity::new("ann", "local", "ann", UserRole::Player))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
