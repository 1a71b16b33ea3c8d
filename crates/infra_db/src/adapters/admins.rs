//! PostgreSQL Administrator Adapter

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{AdminId, PortError, DomainPort, HealthCheckable, HealthCheckResult};
use domain_admin::{AdminAccount, AdminPort, NewAdmin};

use crate::adapters::{db_to_port_error, pool_health};
use crate::error::DatabaseError;
use crate::repositories::admins::{AdminRepository, AdminRow};

/// PostgreSQL-backed implementation of `AdminPort`
#[derive(Debug, Clone)]
pub struct PostgresAdminAdapter {
    repository: AdminRepository,
    pool: PgPool,
}

impl PostgresAdminAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AdminRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresAdminAdapter {}

#[async_trait]
impl HealthCheckable for PostgresAdminAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        pool_health(&self.pool, "postgres-admin-adapter").await
    }
}

#[async_trait]
impl AdminPort for PostgresAdminAdapter {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, PortError> {
        let row = self
            .repository
            .find_by_username(username)
            .await
            .map_err(db_to_port_error)?;
        Ok(row.map(row_to_account))
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, PortError> {
        self.repository
            .insert(&admin.username, &admin.password_hash)
            .await
            .map(row_to_account)
            .map_err(|e| match e {
                DatabaseError::DuplicateEntry(_) => PortError::conflict(admin.username.clone()),
                other => db_to_port_error(other),
            })
    }
}

fn row_to_account(row: AdminRow) -> AdminAccount {
    AdminAccount {
        id: AdminId::new(row.id),
        username: row.username,
        password_hash: row.password_hash,
        created_at: row.created_at,
    }
}
