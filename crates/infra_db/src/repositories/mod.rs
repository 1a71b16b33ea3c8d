//! Repository implementations
//!
//! Repositories own the SQL for one table each and return row types.
//! Queries are checked at runtime (`sqlx::query_as::<_, Row>`) so the crate
//! builds without a live database.

pub mod flights;
pub mod claims;
pub mod admins;

pub use flights::{FlightRepository, FlightRow, FlightValues};
pub use claims::{ClaimsRepository, ClaimRow};
pub use admins::{AdminRepository, AdminRow};
