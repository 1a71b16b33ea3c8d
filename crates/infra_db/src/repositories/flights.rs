//! Flights repository

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::error::DatabaseError;

const FLIGHT_COLUMNS: &str = r#"
    id, flight_number, flight_date, flight_status,
    departure_airport, departure_timezone, departure_iata, departure_delay,
    departure_scheduled, departure_actual,
    arrival_airport, arrival_timezone, arrival_iata, arrival_scheduled, arrival_actual,
    airline_name, created_at, updated_at
"#;

/// Database row for a flight
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlightRow {
    pub id: i64,
    pub flight_number: String,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<String>,
    pub departure_airport: Option<String>,
    pub departure_timezone: Option<String>,
    pub departure_iata: Option<String>,
    pub departure_delay: Option<f64>,
    pub departure_scheduled: Option<DateTime<Utc>>,
    pub departure_actual: Option<DateTime<Utc>>,
    pub arrival_airport: Option<String>,
    pub arrival_timezone: Option<String>,
    pub arrival_iata: Option<String>,
    pub arrival_scheduled: Option<DateTime<Utc>>,
    pub arrival_actual: Option<DateTime<Utc>>,
    pub airline_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert and update
#[derive(Debug, Clone, Default)]
pub struct FlightValues {
    pub flight_number: String,
    pub flight_date: Option<DateTime<Utc>>,
    pub flight_status: Option<String>,
    pub departure_airport: Option<String>,
    pub departure_timezone: Option<String>,
    pub departure_iata: Option<String>,
    pub departure_delay: Option<f64>,
    pub departure_scheduled: Option<DateTime<Utc>>,
    pub departure_actual: Option<DateTime<Utc>>,
    pub arrival_airport: Option<String>,
    pub arrival_timezone: Option<String>,
    pub arrival_iata: Option<String>,
    pub arrival_scheduled: Option<DateTime<Utc>>,
    pub arrival_actual: Option<DateTime<Utc>>,
    pub airline_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FlightRepository {
    pool: PgPool,
}

impl FlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a flight by number using any executor, so it can run inside
    /// a caller's transaction
    pub async fn fetch_by_number<'e, E>(executor: E, flight_number: &str) -> Result<Option<FlightRow>, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {} FROM flights WHERE flight_number = $1", FLIGHT_COLUMNS);
        let row = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(flight_number)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    pub async fn get_by_number(&self, flight_number: &str) -> Result<FlightRow, DatabaseError> {
        Self::fetch_by_number(&self.pool, flight_number)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Flight", flight_number))
    }

    pub async fn list_all(&self) -> Result<Vec<FlightRow>, DatabaseError> {
        let sql = format!("SELECT {} FROM flights ORDER BY id", FLIGHT_COLUMNS);
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn exists(&self, flight_number: &str) -> Result<bool, DatabaseError> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM flights WHERE flight_number = $1)",
        )
        .bind(flight_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    /// Inserts a flight
    ///
    /// Fails with `DuplicateEntry` if the flight number is taken.
    pub async fn insert(&self, values: &FlightValues) -> Result<FlightRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO flights (
                flight_number, flight_date, flight_status,
                departure_airport, departure_timezone, departure_iata, departure_delay,
                departure_scheduled, departure_actual,
                arrival_airport, arrival_timezone, arrival_iata, arrival_scheduled, arrival_actual,
                airline_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            FLIGHT_COLUMNS
        );
        let row = bind_values(sqlx::query_as::<_, FlightRow>(&sql), values)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Overwrites every column of the flight with this id
    pub async fn update(&self, id: i64, values: &FlightValues) -> Result<(), DatabaseError> {
        let sql = format!(
            r#"
            UPDATE flights SET
                flight_number = $1, flight_date = $2, flight_status = $3,
                departure_airport = $4, departure_timezone = $5, departure_iata = $6,
                departure_delay = $7, departure_scheduled = $8, departure_actual = $9,
                arrival_airport = $10, arrival_timezone = $11, arrival_iata = $12,
                arrival_scheduled = $13, arrival_actual = $14,
                airline_name = $15, updated_at = NOW()
            WHERE id = $16
            RETURNING {}
            "#,
            FLIGHT_COLUMNS
        );
        bind_values(sqlx::query_as::<_, FlightRow>(&sql), values)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Flight", id))?;
        Ok(())
    }

    pub async fn delete_by_number(&self, flight_number: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM flights WHERE flight_number = $1")
            .bind(flight_number)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Flight", flight_number));
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

type FlightQuery<'q> = sqlx::query::QueryAs<'q, sqlx::Postgres, FlightRow, sqlx::postgres::PgArguments>;

fn bind_values<'q>(query: FlightQuery<'q>, v: &'q FlightValues) -> FlightQuery<'q> {
    query
        .bind(&v.flight_number)
        .bind(v.flight_date)
        .bind(&v.flight_status)
        .bind(&v.departure_airport)
        .bind(&v.departure_timezone)
        .bind(&v.departure_iata)
        .bind(v.departure_delay)
        .bind(v.departure_scheduled)
        .bind(v.departure_actual)
        .bind(&v.arrival_airport)
        .bind(&v.arrival_timezone)
        .bind(&v.arrival_iata)
        .bind(v.arrival_scheduled)
        .bind(v.arrival_actual)
        .bind(&v.airline_name)
}
