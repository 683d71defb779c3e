//! Store set selected by the configured provider.

use std::sync::Arc;

use tracing::info;

use smartspace_core::config::database::{DatabaseConfig, StoreProvider};
use smartspace_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{IdSequence, MemoryActionStore, MemoryElementStore, MemoryUserStore};
use crate::repositories::{ActionRepository, ElementRepository, UserRepository};
use crate::store::{ActionStore, ElementStore, UserStore};

/// The three stores the services run against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Action store.
    pub actions: Arc<dyn ActionStore>,
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Element store.
    pub elements: Arc<dyn ElementStore>,
    /// Pool backing the PostgreSQL stores, if any.
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores named by `config.provider`.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL stores");
                let db = DatabasePool::connect_and_migrate(config).await?;
                Ok(Self::postgres(db))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory stores");
                Ok(Self::in_memory())
            }
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            actions: Arc::new(ActionRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            elements: Arc::new(ElementRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Empty process-local stores sharing one id sequence.
    pub fn in_memory() -> Self {
        let ids = IdSequence::new();
        Self {
            actions: Arc::new(MemoryActionStore::new(ids.clone())),
            users: Arc::new(MemoryUserStore::new()),
            elements: Arc::new(MemoryElementStore::new(ids)),
            pool: None,
        }
    }

    /// Whether the stores are backed by PostgreSQL.
    pub fn is_persistent(&self) -> bool {
        self.pool.is_some()
    }

    /// Check the backing database, if there is one.
    pub async fn health_check(&self) -> AppResult<()> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(()),
        }
    }

    /// Close the backing pool, if there is one.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let config = DatabaseConfig {
            provider: StoreProvider::Memory,
            ..DatabaseConfig::default()
        };
        let stores = Stores::from_config(&config).await.unwrap();
        assert_eq!(stores.actions.count().await.unwrap(), 0);
        assert!(stores.health_check().await.is_ok());
    }
}
