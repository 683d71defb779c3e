//! Generic repository trait for keyed entity stores.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic keyed repository.
///
/// Every smartspace entity is addressed by a composite key. Entity-specific
/// queries are declared on the store traits that extend this one.
#[async_trait]
pub trait Repository<Entity, Key>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    Key: Send + Sync + 'static,
{
    /// Find an entity by its key.
    async fn read_by_id(&self, key: &Key) -> AppResult<Option<Entity>>;

    /// Store a new locally authored entity. The store assigns its identity.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Store an entity exactly as given, keeping its identity.
    async fn insert(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by key. Returns `true` if a row was removed.
    async fn delete_by_id(&self, key: &Key) -> AppResult<bool>;

    /// Count stored entities.
    async fn count(&self) -> AppResult<u64>;
}
