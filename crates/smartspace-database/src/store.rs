//! Store traits consumed by the service layer.
//!
//! Each trait extends the generic [`Repository`] with the entity-specific
//! queries the services need. Every list query takes a [`PageRequest`]
//! which is applied by the store, after filtering and ordering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::{ActionKey, ElementKey, UserKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_core::types::sorting::SortField;
use smartspace_entity::action::ActionEntity;
use smartspace_entity::element::ElementEntity;
use smartspace_entity::user::{UserEntity, UserRole};

/// Logical sort field: creation timestamp.
pub const SORT_CREATED: &str = "created";

/// Logical sort field: composite key string.
pub const SORT_KEY: &str = "key";

/// Users, addressed by `email#smartspace`.
#[async_trait]
pub trait UserStore: Repository<UserEntity, UserKey> + std::fmt::Debug {
    /// Role of the user `email` in `smartspace`, or `None` if no such user.
    async fn get_user_role(&self, smartspace: &str, email: &str) -> AppResult<Option<UserRole>> {
        let user = self.read_by_id(&UserKey::new(email, smartspace)).await?;
        Ok(user.map(|u| u.role))
    }

    /// List users ordered by key.
    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<UserEntity>>;
}

/// Elements, addressed by `elementId#elementSmartspace`.
#[async_trait]
pub trait ElementStore: Repository<ElementEntity, ElementKey> + std::fmt::Debug {
    /// List elements ordered by creation time.
    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<ElementEntity>>;
}

/// Actions, addressed by `actionId#actionSmartspace`.
#[async_trait]
pub trait ActionStore: Repository<ActionEntity, ActionKey> + std::fmt::Debug {
    /// Insert every action of a batch, or none of them.
    async fn insert_all(&self, actions: &[ActionEntity]) -> AppResult<Vec<ActionEntity>>;

    /// List every action in the given order.
    async fn read_all(&self, sort: &SortField, page: PageRequest) -> AppResult<Vec<ActionEntity>>;

    /// Actions of `email` whose type contains `action_type`.
    async fn read_with_type_containing_and_email(
        &self,
        sort: &SortField,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>>;

    /// Actions created within `[from, to]`, oldest first.
    async fn read_available(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>>;

    /// Actions of `email` with type `action_type` created within `[from, to]`,
    /// oldest first.
    async fn read_available_by_email_and_type(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>>;

    /// Actions of `smartspace` with type `action_type` created within
    /// `[from, to]`, oldest first.
    async fn read_all_available_by_type_and_timestamps(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>>;

    /// Actions of `smartspace` with type `action_type`, oldest first.
    async fn read_all_available_by_type(
        &self,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>>;
}
