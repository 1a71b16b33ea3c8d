//! Embedded schema migrations

use sqlx::migrate::Migrator;
use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Migrations from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies any pending migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}
