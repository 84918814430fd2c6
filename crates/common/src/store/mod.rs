//! Conference data store abstraction
//!
//! One trait covers every persistent collection: papers, announcements,
//! registrations, users, and the site document. Two backends implement
//! it, an in-memory store for development and tests and a Postgres store
//! for deployments.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::Result;
use crate::models::{
    Announcement, AnnouncementUpdate, NewAnnouncement, NewPaper, NewRegistration, PaperSubmission,
    PaperUpdate, Registration, SiteContent, SiteContentPatch, UserRecord,
};
use crate::seed::SeedData;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for conference data access
///
/// Listings return newest first. Lookup, update, and delete of a missing
/// id fail with `AppError::NotFound`.
#[async_trait]
pub trait ConferenceStore: Send + Sync {
    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<()>;

    // Papers

    async fn list_papers(&self) -> Result<Vec<PaperSubmission>>;

    async fn get_paper(&self, id: i64) -> Result<PaperSubmission>;

    /// Create a paper with the fixed initial statuses; see
    /// [`NewPaper::into_submission`].
    async fn create_paper(&self, submission: NewPaper) -> Result<PaperSubmission>;

    async fn update_paper(&self, id: i64, update: PaperUpdate) -> Result<PaperSubmission>;

    async fn delete_paper(&self, id: i64) -> Result<()>;

    /// Record an uploaded full text: set the url/filename pair and mark
    /// the full text approved.
    async fn attach_full_text(
        &self,
        id: i64,
        url: &str,
        file_name: &str,
    ) -> Result<PaperSubmission>;

    /// Remove the full text: clear the url/filename pair and reset the
    /// full-text status to pending.
    async fn detach_full_text(&self, id: i64) -> Result<PaperSubmission>;

    // Announcements

    async fn list_announcements(&self) -> Result<Vec<Announcement>>;

    /// Create an announcement; the id and the display date are assigned
    /// here, never taken from the client.
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement>;

    async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> Result<Announcement>;

    async fn delete_announcement(&self, id: i64) -> Result<()>;

    // Registrations

    async fn list_registrations(&self) -> Result<Vec<Registration>>;

    async fn create_registration(&self, registration: NewRegistration) -> Result<Registration>;

    // Users

    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    // Site content

    async fn get_site_content(&self) -> Result<SiteContent>;

    /// Shallow-merge a patch into the site document: present top-level
    /// keys replace the stored keys wholesale, absent keys are untouched.
    async fn patch_site_content(&self, patch: SiteContentPatch) -> Result<SiteContent>;
}

/// Create a store based on configuration
pub async fn create_store(config: &AppConfig) -> Result<Arc<dyn ConferenceStore>> {
    match config.store.backend.as_str() {
        "postgres" => {
            let pool = DbPool::new(&config.database).await?;
            let store = PostgresStore::new(pool);
            store.ensure_schema().await?;
            if config.store.seed_on_start {
                store.seed_if_empty(SeedData::initial()?).await?;
            }
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryStore::new(SeedData::initial()?))),
        other => {
            tracing::warn!(backend = other, "Unknown store backend, using memory");
            Ok(Arc::new(MemoryStore::new(SeedData::initial()?)))
        }
    }
}

/// Today's date in the display format announcements carry (`DD/MM/YYYY`).
pub fn today_display_date() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}
