//! Administrator Domain
//!
//! Administrator accounts and their credentials. Passwords are stored as
//! argon2 PHC strings; plaintext never leaves [`password`].

pub mod account;
pub mod password;
pub mod error;
pub mod ports;
pub mod services;

pub use account::{AdminAccount, NewAdmin};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
pub use error::AdminError;
pub use ports::AdminPort;
pub use services::AdminService;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockAdminPort;
