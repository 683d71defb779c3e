//! In-memory action store.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use smartspace_core::error::AppError;
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::ActionKey;
use smartspace_core::types::pagination::PageRequest;
use smartspace_core::types::sorting::{SortDirection, SortField};
use smartspace_entity::action::ActionEntity;

use super::IdSequence;
use crate::store::{ActionStore, SORT_CREATED, SORT_KEY};

/// Actions kept in an ordered map behind one lock.
///
/// A batch import holds the write lock for the whole batch, so readers see
/// either none or all of it.
#[derive(Debug)]
pub struct MemoryActionStore {
    actions: RwLock<BTreeMap<ActionKey, ActionEntity>>,
    ids: Arc<IdSequence>,
}

impl MemoryActionStore {
    /// Create an empty store drawing ids from `ids`.
    pub fn new(ids: Arc<IdSequence>) -> Self {
        Self {
            actions: RwLock::new(BTreeMap::new()),
            ids,
        }
    }

    /// Filter, sort oldest first, and page.
    async fn select_window<F>(&self, page: PageRequest, keep: F) -> Vec<ActionEntity>
    where
        F: Fn(&ActionEntity) -> bool,
    {
        let actions = self.actions.read().await;
        let mut selected: Vec<ActionEntity> =
            actions.values().filter(|a| keep(a)).cloned().collect();
        selected.sort_by(by_created);
        page.slice(selected)
    }
}

fn by_created(a: &ActionEntity, b: &ActionEntity) -> Ordering {
    a.creation_timestamp
        .cmp(&b.creation_timestamp)
        .then_with(|| a.key().to_string().cmp(&b.key().to_string()))
}

fn by_key(a: &ActionEntity, b: &ActionEntity) -> Ordering {
    a.key().to_string().cmp(&b.key().to_string())
}

/// Sort `actions` by a logical sort field.
fn sort_actions(actions: &mut [ActionEntity], sort: &SortField) -> AppResult<()> {
    let compare: fn(&ActionEntity, &ActionEntity) -> Ordering = match sort.field.as_str() {
        SORT_CREATED => by_created,
        SORT_KEY => by_key,
        other => {
            return Err(AppError::validation(format!(
                "Cannot sort actions by '{other}'. Supported: {SORT_CREATED}, {SORT_KEY}"
            )));
        }
    };

    match sort.direction {
        SortDirection::Asc => actions.sort_by(compare),
        SortDirection::Desc => actions.sort_by(|a, b| compare(b, a)),
    }
    Ok(())
}

fn within(action: &ActionEntity, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    action.creation_timestamp >= from && action.creation_timestamp <= to
}

fn duplicate(key: &ActionKey) -> AppError {
    AppError::conflict(format!("Action '{key}' already exists"))
}

#[async_trait]
impl Repository<ActionEntity, ActionKey> for MemoryActionStore {
    async fn read_by_id(&self, key: &ActionKey) -> AppResult<Option<ActionEntity>> {
        Ok(self.actions.read().await.get(key).cloned())
    }

    async fn create(&self, action: &ActionEntity) -> AppResult<ActionEntity> {
        if action.action_smartspace.is_empty() {
            return Err(AppError::validation("Action smartspace must be set before create"));
        }

        let mut action = action.clone();
        action.action_id = self.ids.next_id();
        self.insert(&action).await
    }

    async fn insert(&self, action: &ActionEntity) -> AppResult<ActionEntity> {
        let key = action.key();
        let mut actions = self.actions.write().await;
        if actions.contains_key(&key) {
            return Err(duplicate(&key));
        }
        actions.insert(key, action.clone());
        Ok(action.clone())
    }

    async fn delete_by_id(&self, key: &ActionKey) -> AppResult<bool> {
        Ok(self.actions.write().await.remove(key).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.actions.read().await.len() as u64)
    }
}

#[async_trait]
impl ActionStore for MemoryActionStore {
    async fn insert_all(&self, batch: &[ActionEntity]) -> AppResult<Vec<ActionEntity>> {
        let mut actions = self.actions.write().await;

        let mut seen = std::collections::BTreeSet::new();
        for action in batch {
            let key = action.key();
            if actions.contains_key(&key) || !seen.insert(key.clone()) {
                return Err(duplicate(&key));
            }
        }

        for action in batch {
            actions.insert(action.key(), action.clone());
        }

        debug!(count = batch.len(), "Imported action batch");
        Ok(batch.to_vec())
    }

    async fn read_all(&self, sort: &SortField, page: PageRequest) -> AppResult<Vec<ActionEntity>> {
        let mut all: Vec<ActionEntity> = self.actions.read().await.values().cloned().collect();
        sort_actions(&mut all, sort)?;
        Ok(page.slice(all))
    }

    async fn read_with_type_containing_and_email(
        &self,
        sort: &SortField,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        let mut matching: Vec<ActionEntity> = self
            .actions
            .read()
            .await
            .values()
            .filter(|a| a.player_email == email && a.action_type.contains(action_type))
            .cloned()
            .collect();
        sort_actions(&mut matching, sort)?;
        Ok(page.slice(matching))
    }

    async fn read_available(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        Ok(self.select_window(page, |a| within(a, from, to)).await)
    }

    async fn read_available_by_email_and_type(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        Ok(self
            .select_window(page, |a| {
                within(a, from, to) && a.player_email == email && a.action_type == action_type
            })
            .await)
    }

    async fn read_all_available_by_type_and_timestamps(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        Ok(self
            .select_window(page, |a| {
                within(a, from, to)
                    && a.action_smartspace == smartspace
                    && a.action_type == action_type
            })
            .await)
    }

    async fn read_all_available_by_type(
        &self,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        Ok(self
            .select_window(page, |a| {
                a.action_smartspace == smartspace && a.action_type == action_type
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use smartspace_core::types::key::{ElementKey, UserKey};

    fn action(id: &str, action_type: &str, email: &str, at: DateTime<Utc>) -> ActionEntity {
        let mut action = ActionEntity::new(
            action_type,
            &UserKey::new(email, "local"),
            &ElementKey::new("1", "local"),
        )
        .with_timestamp(at);
        action.action_id = id.to_string();
        action.action_smartspace = "local".to_string();
        action
    }

    #[tokio::test]
    async fn test_create_requires_smartspace() {
        let store = MemoryActionStore::new(IdSequence::new());
        let mut unsaved = action("", "Echo", "a@x", Utc::now());
        unsaved.action_smartspace.clear();
        assert!(store.create(&unsaved).await.is_err());
    }

    #[tokio::test]
    async fn test_insert_all_is_all_or_nothing() {
        let store = MemoryActionStore::new(IdSequence::new());
        let now = Utc::now();
        store.insert(&action("2", "Echo", "a@x", now)).await.unwrap();

        let batch = vec![action("1", "Echo", "a@x", now), action("2", "Echo", "a@x", now)];
        assert!(store.insert_all(&batch).await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);

        let batch = vec![action("3", "Echo", "a@x", now), action("3", "Echo", "a@x", now)];
        assert!(store.insert_all(&batch).await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_type_containing_filters_and_sorts() {
        let store = MemoryActionStore::new(IdSequence::new());
        let t0 = Utc::now();
        for (i, kind) in ["CheckIn", "CheckOut", "CheckIn"].iter().enumerate() {
            let at = t0 + Duration::seconds(i as i64);
            store
                .insert(&action(&i.to_string(), kind, "a@x", at))
                .await
                .unwrap();
        }
        store
            .insert(&action("9", "CheckIn", "b@x", t0))
            .await
            .unwrap();

        let found = store
            .read_with_type_containing_and_email(
                &SortField::desc(SORT_CREATED),
                "a@x",
                "In",
                PageRequest::unpaged(),
            )
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|a| a.action_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0"]);
    }

    #[tokio::test]
    async fn test_window_is_inclusive_and_paged() {
        let store = MemoryActionStore::new(IdSequence::new());
        let t0 = Utc::now();
        for i in 0..5 {
            store
                .insert(&action(&i.to_string(), "Echo", "a@x", t0 + Duration::seconds(i)))
                .await
                .unwrap();
        }

        let window = store
            .read_available(t0 + Duration::seconds(1), t0 + Duration::seconds(3), PageRequest::unpaged())
            .await
            .unwrap();
        assert_eq!(window.len(), 3);

        let second_page = store
            .read_available(t0, t0 + Duration::seconds(4), PageRequest::new(1, 2))
            .await
            .unwrap();
        let ids: Vec<_> = second_page.iter().map(|a| a.action_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let store = MemoryActionStore::new(IdSequence::new());
        let result = store
            .read_all(&SortField::asc("playerEmail"), PageRequest::default())
            .await;
        assert!(result.is_err());
    }
}
