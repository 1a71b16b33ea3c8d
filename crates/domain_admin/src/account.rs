//! Administrator account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AdminId;

use crate::error::AdminError;
use crate::password::{hash_password_async, verify_password_async};

/// A stored administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: String,
    /// argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    pub async fn verify(&self, password: &str) -> bool {
        verify_password_async(password.to_string(), self.password_hash.clone()).await
    }
}

/// An administrator about to be stored, with the password already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub password_hash: String,
}

impl NewAdmin {
    /// Validates the username and hashes the password
    pub async fn new(username: &str, password: &str) -> Result<Self, AdminError> {
        let username = username.trim();
        if username.is_empty() || username.len() > 50 {
            return Err(AdminError::InvalidAccount(
                "username must be between 1 and 50 characters".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AdminError::InvalidAccount("password must not be empty".to_string()));
        }
        Ok(Self {
            username: username.to_string(),
            password_hash: hash_password_async(password.to_string()).await?,
        })
    }

    pub fn into_account(self, id: AdminId, created_at: DateTime<Utc>) -> AdminAccount {
        AdminAccount {
            id,
            username: self.username,
            password_hash: self.password_hash,
            created_at,
        }
    }
}
