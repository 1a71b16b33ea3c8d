//! Test Utilities Crate
//!
//! Shared test infrastructure for the flight compensation workspace.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built flights, claims and amounts
//! - `builders`: Builder patterns for test data construction
//! - `database`: PostgreSQL test container management
//! - `assertions`: Claim and money assertion helpers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
