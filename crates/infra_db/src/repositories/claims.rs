//! Claims repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str =
    "id, passenger_name, flight_number, amount, currency, status, created_at, updated_at";

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub passenger_name: String,
    pub flight_number: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Starts a transaction on the repository's pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, DatabaseError> {
        Ok(self.pool.begin().await?)
    }

    /// Inserts a pending claim with a zero amount
    pub async fn insert(
        &self,
        passenger_name: &str,
        flight_number: &str,
        currency: &str,
    ) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO claims (passenger_name, flight_number, amount, currency, status)
            VALUES ($1, $2, 0, $3, 'Pending')
            RETURNING {}
            "#,
            CLAIM_COLUMNS
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(passenger_name)
            .bind(flight_number)
            .bind(currency)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ClaimRow, DatabaseError> {
        let sql = format!("SELECT {} FROM claims WHERE id = $1", CLAIM_COLUMNS);
        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Locks the claim row until the surrounding transaction ends
    pub async fn lock_by_id<'e, E>(executor: E, id: i64) -> Result<Option<ClaimRow>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {} FROM claims WHERE id = $1 FOR UPDATE", CLAIM_COLUMNS);
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    /// Oldest claim matching passenger and flight, trimmed and case-insensitive
    pub async fn find_by_passenger(
        &self,
        passenger_name: &str,
        flight_number: &str,
    ) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {} FROM claims
            WHERE LOWER(passenger_name) = LOWER(TRIM($1))
              AND LOWER(flight_number) = LOWER(TRIM($2))
            ORDER BY id
            LIMIT 1
            "#,
            CLAIM_COLUMNS
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(passenger_name)
            .bind(flight_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_all(&self) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {} FROM claims ORDER BY id", CLAIM_COLUMNS);
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Writes an assessment result
    pub async fn record_assessment<'e, E>(
        executor: E,
        id: i64,
        amount: Decimal,
        currency: &str,
        status: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET amount = $2, currency = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(currency)
        .bind(status)
        .bind(updated_at)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", id));
        }
        Ok(())
    }
}
