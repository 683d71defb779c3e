//! In-memory user store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use smartspace_core::error::AppError;
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::UserKey;
use smartspace_core::types::pagination::PageRequest;
use smartspace_entity::user::UserEntity;

use crate::store::UserStore;

/// Users kept in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<UserKey, UserEntity>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<UserEntity, UserKey> for MemoryUserStore {
    async fn read_by_id(&self, key: &UserKey) -> AppResult<Option<UserEntity>> {
        Ok(self.users.get(key).map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: &UserEntity) -> AppResult<UserEntity> {
        self.insert(user).await
    }

    async fn insert(&self, user: &UserEntity) -> AppResult<UserEntity> {
        match self.users.entry(user.key()) {
            Entry::Occupied(entry) => Err(AppError::conflict(format!(
                "User '{}' already exists",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(user.clone());
                Ok(user.clone())
            }
        }
    }

    async fn delete_by_id(&self, key: &UserKey) -> AppResult<bool> {
        Ok(self.users.remove(key).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<UserEntity>> {
        let mut users: Vec<UserEntity> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.key());
        Ok(page.slice(users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_entity::user::UserRole;

    #[tokio::test]
    async fn test_insert_and_role_lookup() {
        let store = MemoryUserStore::new();
        store
            .insert(&UserEntity::new("root@x", "local", "root", UserRole::Admin))
            .await
            .unwrap();

        assert_eq!(
            store.get_user_role("local", "root@x").await.unwrap(),
            Some(UserRole::Admin)
        );
        assert_eq!(store.get_user_role("other", "root@x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = MemoryUserStore::new();
        let user = UserEntity::new("p@x", "local", "p", UserRole::Player);
        store.insert(&user).await.unwrap();
        assert!(store.insert(&user).await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
