//! Infrastructure Database Layer
//!
//! PostgreSQL storage for flights, claims and administrator accounts, using
//! SQLx with runtime-checked queries.
//!
//! # Architecture
//!
//! Repositories own the SQL and speak in row types. Adapters implement the
//! domain ports on top of the repositories and translate rows into domain
//! values and `DatabaseError` into `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresFlightAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/flightclaim")).await?;
//! run_migrations(&pool).await?;
//! let flights = PostgresFlightAdapter::new(pool.clone());
//! ```

pub mod pool;
pub mod error;
pub mod migrations;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, DatabaseConfig};
pub use error::DatabaseError;
pub use migrations::run_migrations;
pub use adapters::{PostgresFlightAdapter, PostgresClaimsAdapter, PostgresAdminAdapter};
