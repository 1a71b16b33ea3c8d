//! Administrator accounts repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DatabaseError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminRow>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Fails with `DuplicateEntry` if the username is taken
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<AdminRow, DatabaseError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
