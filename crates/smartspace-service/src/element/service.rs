//! Element operations used by the CLI and the HTTP API.

use std::sync::Arc;

use tracing::info;

use smartspace_core::error::AppError;
use smartspace_core::types::key::{ElementKey, UserKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_database::store::{ElementStore, UserStore};
use smartspace_entity::element::ElementEntity;

use crate::action::validation::is_present;

/// Registers and looks up elements of the local smartspace.
#[derive(Debug, Clone)]
pub struct ElementService {
    /// Element store.
    elements: Arc<dyn ElementStore>,
    /// User store, for the creator check.
    users: Arc<dyn UserStore>,
    /// Name of the local smartspace.
    local_smartspace: String,
}

impl ElementService {
    /// Creates a new element service.
    pub fn new(
        elements: Arc<dyn ElementStore>,
        users: Arc<dyn UserStore>,
        local_smartspace: impl Into<String>,
    ) -> Self {
        Self {
            elements,
            users,
            local_smartspace: local_smartspace.into(),
        }
    }

    /// Register a local element. The store assigns its id; the creator must
    /// be a known user.
    pub async fn create_element(&self, mut element: ElementEntity) -> Result<ElementEntity, AppError> {
        if !is_present(&element.name) || !is_present(&element.element_type) {
            return Err(AppError::validation("Element name and type are required"));
        }

        let creator = UserKey::new(&element.creator_email, &element.creator_smartspace);
        if self.users.read_by_id(&creator).await?.is_none() {
            return Err(AppError::not_found(format!("Creator '{creator}' not found")));
        }

        element.element_smartspace = self.local_smartspace.clone();
        let created = self.elements.create(&element).await?;
        info!(element = %created.key(), name = %created.name, "Element created");
        Ok(created)
    }

    /// Look up an element by key.
    pub async fn get_element(&self, key: &ElementKey) -> Result<ElementEntity, AppError> {
        self.elements
            .read_by_id(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Element '{key}' not found")))
    }

    /// List elements ordered by creation time.
    pub async fn list_elements(&self, page: PageRequest) -> Result<Vec<ElementEntity>, AppError> {
        self.elements.read_all(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspace_database::Stores;
    use smartspace_entity::user::{UserEntity, UserRole};

    #[tokio::test]
    async fn test_create_element_in_local_smartspace() {
        let stores = Stores::in_memory();
        stores
            .users
            .insert(&UserEntity::new("ann@x", "local", "ann", UserRole::Manager))
            .await
            .unwrap();
        let service = ElementService::new(stores.elements.clone(), stores.users.clone(), "local");

        let created = service
            .create_element(ElementEntity::new("elsewhere", "Gate", "door", "ann@x", "local"))
            .await
            .unwrap();
        assert_eq!(created.element_smartspace, "local");
        assert_eq!(service.get_element(&created.key()).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_unknown_creator_is_rejected() {
        let stores = Stores::in_memory();
        let service = ElementService::new(stores.elements.clone(), stores.users.clone(), "local");
        assert!(
            service
                .create_element(ElementEntity::new("local", "Gate", "door", "nobody@x", "local"))
                .await
                .is_err()
        );
    }
}
