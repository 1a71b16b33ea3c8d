//! Claims Domain
//!
//! Passenger compensation claims and the rule engine that prices them.
//!
//! # Claim Lifecycle
//!
//! ```text
//! submit -> Pending -> (operator triggers assessment) -> Approved | Denied
//! ```
//!
//! Assessment reads the departure delay of the claim's flight, looks the
//! delay up in the [`CompensationSchedule`] and writes the resulting amount
//! and status back to the claim. Re-assessing with an unchanged delay yields
//! the same result.

pub mod compensation;
pub mod claim;
pub mod error;
pub mod ports;
pub mod services;

pub use compensation::{
    CompensationRule, CompensationSchedule, CompensationTier, compute_compensation,
};
pub use claim::{Claim, ClaimStatus, NewClaim, CompensationAssessment};
pub use error::ClaimError;
pub use ports::ClaimsPort;
pub use services::{CompensationService, ClaimLookup, ClaimRecord};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimsPort;
