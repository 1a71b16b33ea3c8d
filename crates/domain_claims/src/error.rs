//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    #[error("Either claim_id or passenger_name and flight_number are required")]
    MissingLookupKey,

    #[error("Invalid compensation schedule: {0}")]
    InvalidSchedule(String),

    #[error("Cannot assess claim: {0}")]
    Unassessable(String),

    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } if entity_type == "Claim" => {
                ClaimError::ClaimNotFound(id)
            }
            PortError::NotFound { entity_type, id } if entity_type == "Flight" => {
                ClaimError::FlightNotFound(id)
            }
            PortError::Validation { message, .. } => ClaimError::Unassessable(message),
            other => ClaimError::Port(other),
        }
    }
}
