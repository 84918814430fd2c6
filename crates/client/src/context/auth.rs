//! Login state

use crate::api::{ApiClient, Result};
use symposia_common::models::User;
use tokio::sync::RwLock;

/// Holds the logged-in user for the life of the process.
///
/// The server issues no token; it only checks credentials. The user
/// record lives in client memory until [`logout`](Self::logout).
pub struct AuthContext {
    api: ApiClient,
    current_user: RwLock<Option<User>>,
}

impl AuthContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            current_user: RwLock::new(None),
        }
    }

    /// Check credentials and remember the user on success
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self.api.login(username, password).await?;
        *self.current_user.write().await = Some(user.clone());
        Ok(user)
    }

    pub async fn logout(&self) {
        *self.current_user.write().await = None;
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_user.read().await.clone()
    }

    /// True when the logged-in user carries the admin role
    pub async fn is_admin(&self) -> bool {
        self.current_user
            .read()
            .await
            .as_ref()
            .map(User::is_admin)
            .unwrap_or(false)
    }
}
