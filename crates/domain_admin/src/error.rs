//! Administrator domain errors

use thiserror::Error;

use core_kernel::PortError;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Unknown user and wrong password are reported identically
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Administrator already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid administrator: {0}")]
    InvalidAccount(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for AdminError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Conflict { message } => AdminError::DuplicateUsername(message),
            other => AdminError::Port(other),
        }
    }
}
