//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

fn map_email_conflict(e: sqlx::Error, email: &str) -> AppError {
    if is_unique_violation(&e, "users_email_key") {
        AppError::conflict(
            "A user with this email already exists",
            json!({ "email": email }),
        )
    } else {
        e.into()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (email, name) VALUES ($1, $2) \
             RETURNING id, email, name, created_at",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_email_conflict(e, &new_user.email))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, email, name, created_at FROM users ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<UserRow> =
            sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(current) = current else {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        };

        let email = patch.email.unwrap_or(current.email);
        let name = patch.name.unwrap_or(current.name);

        let row: UserRow = sqlx::query_as(
            "UPDATE users SET email = $2, name = $3 WHERE id = $1 \
             RETURNING id, email, name, created_at",
        )
        .bind(id)
        .bind(&email)
        .bind(&name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_email_conflict(e, &email))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
