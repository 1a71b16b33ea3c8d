//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsAdapter;
//! use domain_claims::{ClaimsPort, CompensationSchedule};
//!
//! let adapter = PostgresClaimsAdapter::new(pool);
//! let assessment = adapter.assess_claim(claim_id, &CompensationSchedule::standard()).await?;
//! ```

pub mod flights;
pub mod claims;
pub mod admins;

pub use flights::PostgresFlightAdapter;
pub use claims::PostgresClaimsAdapter;
pub use admins::PostgresAdminAdapter;

use std::time::Instant;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Translates database errors into port errors
///
/// `NotFound` is not mapped here: adapters know the entity and key and build
/// their own `PortError::not_found`.
pub(crate) fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound(msg) => PortError::internal(msg),
        DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
        DatabaseError::ConstraintViolation(msg) => PortError::validation(msg),
        DatabaseError::ConnectionFailed(msg) => PortError::connection(msg),
        DatabaseError::PoolExhausted => PortError::Timeout {
            operation: "acquire database connection".to_string(),
            duration_ms: 0,
        },
        DatabaseError::CorruptRow(msg) => PortError::Transformation { message: msg },
        other => PortError::internal(other.to_string()),
    }
}

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn pool_health(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();
    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let mut health = HealthCheckResult::healthy(adapter_id);
    health.latency_ms = start.elapsed().as_millis() as u64;
    if let Err(e) = result {
        health.status = AdapterHealth::Unhealthy;
        health.message = Some(format!("Database error: {}", e));
    }
    health
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = db_to_port_error(DatabaseError::DuplicateEntry("flights_flight_number_key".into()));
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[test]
    fn test_pool_exhaustion_is_transient() {
        assert!(db_to_port_error(DatabaseError::PoolExhausted).is_transient());
    }
}
