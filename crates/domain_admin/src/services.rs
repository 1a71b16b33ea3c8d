//! Administrator service

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::account::{AdminAccount, NewAdmin};
use crate::error::AdminError;
use crate::ports::AdminPort;

#[derive(Clone)]
pub struct AdminService {
    admins: Arc<dyn AdminPort>,
}

impl AdminService {
    pub fn new(admins: Arc<dyn AdminPort>) -> Self {
        Self { admins }
    }

    /// Returns the underlying storage port
    pub fn port(&self) -> Arc<dyn AdminPort> {
        Arc::clone(&self.admins)
    }

    /// Checks a username and password pair
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AdminAccount, AdminError> {
        let found = self.admins.find_by_username(username).await?;
        let verified = match &found {
            Some(account) => account.verify(password).await,
            None => false,
        };
        let account = match found {
            Some(account) if verified => account,
            _ => {
                warn!("Administrator authentication failed");
                return Err(AdminError::InvalidCredentials);
            }
        };
        info!(admin_id = %account.id, "Administrator authenticated");
        Ok(account)
    }

    /// Creates an administrator account
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<AdminAccount, AdminError> {
        let admin = NewAdmin::new(username, password).await?;
        let account = self.admins.create_admin(admin).await?;
        info!(admin_id = %account.id, "Administrator created");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockAdminPort;

    fn service() -> AdminService {
        AdminService::new(Arc::new(MockAdminPort::new()))
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service();
        let created = service.register("ops", "hunter2").await.unwrap();

        let authed = service.authenticate("ops", "hunter2").await.unwrap();
        assert_eq!(authed.id, created.id);
        assert_ne!(authed.password_hash, "hunter2");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let service = service();
        service.register("ops", "hunter2").await.unwrap();

        let wrong = service.authenticate("ops", "nope").await.unwrap_err();
        let unknown = service.authenticate("ghost", "hunter2").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, AdminError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let service = service();
        service.register("ops", "a").await.unwrap();

        let err = service.register("ops", "b").await.unwrap_err();
        assert!(matches!(err, AdminError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn test_blank_username_rejected() {
        let err = service().register("   ", "pw").await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidAccount(_)));
    }
}
