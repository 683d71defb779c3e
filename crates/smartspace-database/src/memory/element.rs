//! In-memory element store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use smartspace_core::error::AppError;
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::ElementKey;
use smartspace_core::types::pagination::PageRequest;
use smartspace_entity::element::ElementEntity;

use super::IdSequence;
use crate::store::ElementStore;

/// Elements kept in a concurrent map.
#[derive(Debug)]
pub struct MemoryElementStore {
    elements: DashMap<ElementKey, ElementEntity>,
    ids: Arc<IdSequence>,
}

impl MemoryElementStore {
    /// Create an empty store drawing ids from `ids`.
    pub fn new(ids: Arc<IdSequence>) -> Self {
        Self {
            elements: DashMap::new(),
            ids,
        }
    }
}

#[async_trait]
impl Repository<ElementEntity, ElementKey> for MemoryElementStore {
    async fn read_by_id(&self, key: &ElementKey) -> AppResult<Option<ElementEntity>> {
        Ok(self.elements.get(key).map(|entry| entry.value().clone()))
    }

    async fn create(&self, element: &ElementEntity) -> AppResult<ElementEntity> {
        let mut element = element.clone();
        element.element_id = self.ids.next_id();
        self.insert(&element).await
    }

    async fn insert(&self, element: &ElementEntity) -> AppResult<ElementEntity> {
        match self.elements.entry(element.key()) {
            Entry::Occupied(entry) => Err(AppError::conflict(format!(
                "Element '{}' already exists",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(element.clone());
                Ok(element.clone())
            }
        }
    }

    async fn delete_by_id(&self, key: &ElementKey) -> AppResult<bool> {
        Ok(self.elements.remove(key).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.elements.len() as u64)
    }
}

#[async_trait]
impl ElementStore for MemoryElementStore {
    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<ElementEntity>> {
        let mut elements: Vec<ElementEntity> =
            self.elements.iter().map(|e| e.value().clone()).collect();
        elements.sort_by_key(|e| e.creation_timestamp);
        Ok(page.slice(elements))
    }
}
