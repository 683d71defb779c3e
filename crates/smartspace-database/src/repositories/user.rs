//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use smartspace_core::error::{AppError, ErrorKind};
use smartspace_core::result::AppResult;
use smartspace_core::traits::Repository;
use smartspace_core::types::key::{CompositeKey, UserKey};
use smartspace_core::types::pagination::PageRequest;
use smartspace_entity::user::{UserEntity, UserRole};

use super::map_insert_error;
use crate::store::UserStore;

/// Repository for smartspace users.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<UserEntity, UserKey> for UserRepository {
    async fn read_by_id(&self, key: &UserKey) -> AppResult<Option<UserEntity>> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT * FROM users WHERE user_email = $1 AND user_smartspace = $2",
        )
        .bind(key.id())
        .bind(key.smartspace())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn create(&self, user: &UserEntity) -> AppResult<UserEntity> {
        self.insert(user).await
    }

    async fn insert(&self, user: &UserEntity) -> AppResult<UserEntity> {
        sqlx::query_as::<_, UserEntity>(
            "INSERT INTO users (user_email, user_smartspace, username, avatar, role, points) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&user.user_email)
        .bind(&user.user_smartspace)
        .bind(&user.username)
        .bind(&user.avatar)
        .bind(user.role)
        .bind(user.points)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "users_pkey", &format!("User '{}'", user.key())))
    }

    async fn delete_by_id(&self, key: &UserKey) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_email = $1 AND user_smartspace = $2")
            .bind(key.id())
            .bind(key.smartspace())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_user_role(&self, smartspace: &str, email: &str) -> AppResult<Option<UserRole>> {
        sqlx::query_scalar::<_, UserRole>(
            "SELECT role FROM users WHERE user_email = $1 AND user_smartspace = $2",
        )
        .bind(email)
        .bind(smartspace)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read user role", e))
    }

    async fn read_all(&self, page: PageRequest) -> AppResult<Vec<UserEntity>> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT * FROM users ORDER BY user_email, user_smartspace LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}
