//! Core Kernel - Foundational types for the flight compensation system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for flights, claims and admin accounts
//! - Money values with precise decimal arithmetic
//! - Port error and health types shared by every adapter

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{FlightId, ClaimId, AdminId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
