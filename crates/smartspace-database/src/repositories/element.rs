//! Element repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use smartspace_core::error::{AppError, ErrorKind};
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::{CompositeKey, ElementKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_entity::element::ElementEntity;

use super::map_insert_error;
use crate::store::ElementStore;

const INSERT_COLUMNS: &str = "element_smartspace, name, element_type, location_x, location_y, \
     creator_email, creator_smartspace, expired, more_attributes, creation_timestamp";

/// Repository for smartspace elements.
#[derive(Debug, Clone)]
pub struct ElementRepository {
    pool: PgPool,
}

impl ElementRepository {
    /// Create a new element repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<ElementEntity, ElementKey> for ElementRepository {
    async fn read_by_id(&self, key: &ElementKey) -> AppResult<Option<ElementEntity>> {
        sqlx::query_as::<_, ElementEntity>(
            "SELECT * FROM elements WHERE element_id = $1 AND element_smartspace = $2",
        )
        .bind(key.id())
        .bind(key.smartspace())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find element", e))
    }

    async fn create(&self, element: &ElementEntity) -> AppResult<ElementEntity> {
        let sql = format!(
            "INSERT INTO elements (element_id, {INSERT_COLUMNS}) \
             VALUES (nextval('generic_id_seq')::TEXT, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *"
        );
        sqlx::query_as::<_, ElementEntity>(&sql)
            .bind(&element.element_smartspace)
            .bind(&element.name)
            .bind(&element.element_type)
            .bind(element.location.x)
            .bind(element.location.y)
            .bind(&element.creator_email)
            .bind(&element.creator_smartspace)
            .bind(element.expired)
            .bind(Json(&element.more_attributes))
            .bind(element.creation_timestamp)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create element", e))
    }

    async fn insert(&self, element: &ElementEntity) -> AppResult<ElementEntity> {
        let sql = format!(
            "INSERT INTO elements (element_id, {INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *"
        );
        sqlx::query_as::<_, ElementEntity>(&sql)
            .bind(&element.element_id)
            .bind(&element.element_smartspace)
            .bind(&element.name)
            .bind(&element.element_type)
            .bind(element.location.x)
            .bind(element.location.y)
            .bind(&element.creator_email)
            .bind(&element.creator_smartspace)
            .bind(element.expired)
            .bind(Json(&element.more_attributes))
            .bind(element.creation_timestamp)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_insert_error(e, "elements_pkey", &format!("Element '{}'", element.key()))
            })
    }

    async fn delete_by_id(&self, key: &ElementKey) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM elements WHERE element_id = $1 AND element_smartspace = $2")
                .bind(key.id())
                .bind(key.smartspace())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete element", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM elements")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count elements", e)
            })?;
        Ok(count as u64)
    }
}

#[async_trait]
impl ElementStore for ElementRepository {
    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<ElementEntity>> {
        sqlx::query_as::<_, ElementEntity>(
            "SELECT * FROM elements ORDER BY creation_timestamp ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list elements", e))
    }
}
