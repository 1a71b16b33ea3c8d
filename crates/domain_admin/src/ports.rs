//! Administrator storage port

use async_trait::async_trait;

use core_kernel::{PortError, DomainPort, HealthCheckable};

use crate::account::{AdminAccount, NewAdmin};

#[async_trait]
pub trait AdminPort: DomainPort + HealthCheckable {
    /// Finds an administrator by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, PortError>;

    /// Stores a new administrator
    ///
    /// Returns `PortError::Conflict` if the username is taken.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdminId, HealthCheckResult};

    /// In-memory mock implementation of AdminPort
    #[derive(Debug, Default, Clone)]
    pub struct MockAdminPort {
        admins: Arc<RwLock<HashMap<String, AdminAccount>>>,
    }

    impl MockAdminPort {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl DomainPort for MockAdminPort {}

    #[async_trait]
    impl HealthCheckable for MockAdminPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-admin-port")
        }
    }

    #[async_trait]
    impl AdminPort for MockAdminPort {
        async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, PortError> {
            Ok(self.admins.read().await.get(username).cloned())
        }

        async fn create_admin(&self, admin: NewAdmin) -> Result<AdminAccount, PortError> {
            let mut admins = self.admins.write().await;
            if admins.contains_key(&admin.username) {
                return Err(PortError::conflict(admin.username));
            }
            let id = AdminId::new(admins.len() as i64 + 1);
            let account = admin.into_account(id, Utc::now());
            admins.insert(account.username.clone(), account.clone());
            Ok(account)
        }
    }
}
