//! Action repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;

use smartspace_core::error::{AppError, ErrorKind};
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::{ActionKey, CompositeKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_core::types::sorting::SortField;
use smartspace_entity::action::ActionEntity;

use super::map_insert_error;
use crate::store::{ActionStore, SORT_CREATED, SORT_KEY};

/// Repository for actions.
#[derive(Debug, Clone)]
pub struct ActionRepository {
    pool: PgPool,
}

impl ActionRepository {
    /// Create a new action repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a windowed select with oldest-first ordering.
    async fn fetch_window(
        &self,
        where_clause: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filters: &[&str],
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        let limit_idx = 3 + filters.len();
        let sql = format!(
            "SELECT * FROM actions WHERE creation_timestamp BETWEEN $1 AND $2 {where_clause} \
             ORDER BY creation_timestamp ASC LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );

        let mut query = sqlx::query_as::<_, ActionEntity>(&sql).bind(from).bind(to);
        for value in filters {
            query = query.bind(value.to_string());
        }

        query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query actions by time", e)
            })
    }
}

/// Translate a logical sort field into an `ORDER BY` clause.
fn order_by(sort: &SortField) -> AppResult<String> {
    let column = match sort.field.as_str() {
        SORT_CREATED => "creation_timestamp",
        SORT_KEY => "(action_id || '#' || action_smartspace)",
        other => {
            return Err(AppError::validation(format!(
                "Cannot sort actions by '{other}'. Supported: {SORT_CREATED}, {SORT_KEY}"
            )));
        }
    };
    Ok(format!("ORDER BY {column} {}", sort.direction.as_sql()))
}

/// Insert one action with its identity preserved.
async fn insert_row<'e, E>(executor: E, action: &ActionEntity) -> AppResult<ActionEntity>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ActionEntity>(
        "INSERT INTO actions (action_id, action_smartspace, action_type, player_email, \
                              player_smartspace, element_id, element_smartspace, \
                              creation_timestamp, more_attributes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(&action.action_id)
    .bind(&action.action_smartspace)
    .bind(&action.action_type)
    .bind(&action.player_email)
    .bind(&action.player_smartspace)
    .bind(&action.element_id)
    .bind(&action.element_smartspace)
    .bind(action.creation_timestamp)
    .bind(Json(&action.more_attributes))
    .fetch_one(executor)
    .await
    .map_err(|e| map_insert_error(e, "actions_pkey", &format!("Action '{}'", action.key())))
}

#[async_trait]
impl Repository<ActionEntity, ActionKey> for ActionRepository {
    async fn read_by_id(&self, key: &ActionKey) -> AppResult<Option<ActionEntity>> {
        sqlx::query_as::<_, ActionEntity>(
            "SELECT * FROM actions WHERE action_id = $1 AND action_smartspace = $2",
        )
        .bind(key.id())
        .bind(key.smartspace())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find action", e))
    }

    async fn create(&self, action: &ActionEntity) -> AppResult<ActionEntity> {
        if action.action_smartspace.is_empty() {
            return Err(AppError::validation("Action smartspace must be set before create"));
        }

        sqlx::query_as::<_, ActionEntity>(
            "INSERT INTO actions (action_id, action_smartspace, action_type, player_email, \
                                  player_smartspace, element_id, element_smartspace, \
                                  creation_timestamp, more_attributes) \
             VALUES (nextval('generic_id_seq')::TEXT, $1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&action.action_smartspace)
        .bind(&action.action_type)
        .bind(&action.player_email)
        .bind(&action.player_smartspace)
        .bind(&action.element_id)
        .bind(&action.element_smartspace)
        .bind(action.creation_timestamp)
        .bind(Json(&action.more_attributes))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create action", e))
    }

    async fn insert(&self, action: &ActionEntity) -> AppResult<ActionEntity> {
        insert_row(&self.pool, action).await
    }

    async fn delete_by_id(&self, key: &ActionKey) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM actions WHERE action_id = $1 AND action_smartspace = $2")
                .bind(key.id())
                .bind(key.smartspace())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete action", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count actions", e))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl ActionStore for ActionRepository {
    async fn insert_all(&self, actions: &[ActionEntity]) -> AppResult<Vec<ActionEntity>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin import transaction", e)
        })?;

        let mut stored = Vec::with_capacity(actions.len());
        for action in actions {
            // An early return drops `tx`, which rolls the batch back.
            stored.push(insert_row(&mut *tx, action).await?);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit action import", e)
        })?;

        debug!(count = stored.len(), "Imported action batch");
        Ok(stored)
    }

    async fn read_all(&self, sort: &SortField, page: PageRequest) -> AppResult<Vec<ActionEntity>> {
        let sql = format!("SELECT * FROM actions {} LIMIT $1 OFFSET $2", order_by(sort)?);
        sqlx::query_as::<_, ActionEntity>(&sql)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list actions", e))
    }

    async fn read_with_type_containing_and_email(
        &self,
        sort: &SortField,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        let sql = format!(
            "SELECT * FROM actions WHERE player_email = $1 AND strpos(action_type, $2) > 0 \
             {} LIMIT $3 OFFSET $4",
            order_by(sort)?
        );
        sqlx::query_as::<_, ActionEntity>(&sql)
            .bind(email)
            .bind(action_type)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query actions by type", e)
            })
    }

    async fn read_available(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        self.fetch_window("", from, to, &[], page).await
    }

    async fn read_available_by_email_and_type(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        email: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        self.fetch_window(
            "AND player_email = $3 AND action_type = $4",
            from,
            to,
            &[email, action_type],
            page,
        )
        .await
    }

    async fn read_all_available_by_type_and_timestamps(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        self.fetch_window(
            "AND action_smartspace = $3 AND action_type = $4",
            from,
            to,
            &[smartspace, action_type],
            page,
        )
        .await
    }

    async fn read_all_available_by_type(
        &self,
        smartspace: &str,
        action_type: &str,
        page: PageRequest,
    ) -> AppResult<Vec<ActionEntity>> {
        sqlx::query_as::<_, ActionEntity>(
            "SELECT * FROM actions WHERE action_smartspace = $1 AND action_type = $2 \
             ORDER BY creation_timestamp ASC LIMIT $3 OFFSET $4",
        )
        .bind(smartspace)
        .bind(action_type)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query actions by type", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_known_fields() {
        assert_eq!(
            order_by(&SortField::asc(SORT_CREATED)).unwrap(),
            "ORDER BY creation_timestamp ASC"
        );
        assert_eq!(
            order_by(&SortField::desc(SORT_KEY)).unwrap(),
            "ORDER BY (action_id || '#' || action_smartspace) DESC"
        );
    }

    #[test]
    fn test_order_by_rejects_unknown_field() {
        assert!(order_by(&SortField::asc("player_email; DROP TABLE actions")).is_err());
    }
}
