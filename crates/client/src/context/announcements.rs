//! Announcement collection mirror

use crate::api::{ApiClient, Result};
use symposia_common::models::{Announcement, AnnouncementUpdate, NewAnnouncement};
use tokio::sync::RwLock;

/// Cached mirror of the announcement collection
pub struct AnnouncementContext {
    api: ApiClient,
    announcements: RwLock<Vec<Announcement>>,
}

impl AnnouncementContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            announcements: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full list into the cache
    pub async fn load(&self) -> Result<()> {
        match self.api.list_announcements().await {
            Ok(announcements) => {
                *self.announcements.write().await = announcements;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load announcements");
                Err(e)
            }
        }
    }

    /// Snapshot of the cached announcements, newest first
    pub async fn announcements(&self) -> Vec<Announcement> {
        self.announcements.read().await.clone()
    }

    /// Create an announcement and prepend the server's record
    pub async fn add_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let created = self.api.create_announcement(announcement).await?;
        self.announcements.write().await.insert(0, created.clone());
        Ok(created)
    }

    /// Merge-update an announcement and take the server's record
    pub async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let updated = self.api.update_announcement(id, update).await?;

        let mut announcements = self.announcements.write().await;
        match announcements.iter_mut().find(|a| a.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => announcements.insert(0, updated.clone()),
        }

        Ok(updated)
    }

    /// Delete an announcement and drop it from the cache
    pub async fn delete_announcement(&self, id: i64) -> Result<()> {
        let deleted = self.api.delete_announcement(id).await?;
        self.announcements
            .write()
            .await
            .retain(|a| a.id != deleted.id);
        Ok(())
    }
}
