//! Registration collection mirror

use crate::api::{ApiClient, Result};
use symposia_common::models::{NewRegistration, Registration};
use tokio::sync::RwLock;

/// Cached mirror of the registration collection
pub struct RegistrationContext {
    api: ApiClient,
    registrations: RwLock<Vec<Registration>>,
}

impl RegistrationContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            registrations: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full list into the cache
    pub async fn load(&self) -> Result<()> {
        match self.api.list_registrations().await {
            Ok(registrations) => {
                *self.registrations.write().await = registrations;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load registrations");
                Err(e)
            }
        }
    }

    /// Snapshot of the cached registrations, newest first
    pub async fn registrations(&self) -> Vec<Registration> {
        self.registrations.read().await.clone()
    }

    /// Register a participant and prepend the server's record
    pub async fn add_registration(&self, registration: NewRegistration) -> Result<Registration> {
        let created = self.api.create_registration(registration).await?;
        self.registrations.write().await.insert(0, created.clone());
        Ok(created)
    }
}
