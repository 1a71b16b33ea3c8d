//! Flight domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the flight domain
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Flight with this number already exists: {0}")]
    DuplicateFlight(String),

    #[error("Invalid departure delay: {0} minutes")]
    InvalidDelay(f64),

    #[error("Invalid flight: {0}")]
    InvalidFlight(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Flight data feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for FlightError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } if entity_type == "Flight" => {
                FlightError::FlightNotFound(id)
            }
            PortError::Conflict { message } => FlightError::DuplicateFlight(message),
            other => FlightError::Port(other),
        }
    }
}
