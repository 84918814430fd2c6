//! In-memory store backend
//!
//! Holds everything in process memory behind one RwLock. Used by tests
//! and local development; contents are lost on restart.

use super::{today_display_date, ConferenceStore};
use crate::errors::{AppError, Result};
use crate::models::{
    Announcement, AnnouncementUpdate, NewAnnouncement, NewPaper, NewRegistration, PaperSubmission,
    PaperUpdate, Registration, ReviewStatus, SiteContent, SiteContentPatch, UserRecord,
};
use crate::seed::SeedData;
use async_trait::async_trait;
use tokio::sync::RwLock;

pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    /// Kept in descending id order; new records go to the front
    papers: Vec<PaperSubmission>,
    announcements: Vec<Announcement>,
    registrations: Vec<Registration>,
    users: Vec<UserRecord>,
    site_content: Option<SiteContent>,
    next_paper_id: i64,
    next_announcement_id: i64,
    next_registration_id: i64,
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        let SeedData {
            users,
            registrations,
            announcements,
            papers,
            site_content,
        } = seed;

        let next_paper_id = next_id(&papers, |p| p.id);
        let next_announcement_id = next_id(&announcements, |a| a.id);
        let next_registration_id = next_id(&registrations, |r| r.id);

        let mut papers = papers;
        papers.sort_by(|a, b| b.id.cmp(&a.id));
        let mut announcements = announcements;
        announcements.sort_by(|a, b| b.id.cmp(&a.id));
        let mut registrations = registrations;
        registrations.sort_by(|a, b| b.id.cmp(&a.id));

        Self {
            inner: RwLock::new(Inner {
                papers,
                announcements,
                registrations,
                users,
                site_content,
                next_paper_id,
                next_announcement_id,
                next_registration_id,
            }),
        }
    }
}

#[async_trait]
impl ConferenceStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_papers(&self) -> Result<Vec<PaperSubmission>> {
        Ok(self.inner.read().await.papers.clone())
    }

    async fn get_paper(&self, id: i64) -> Result<PaperSubmission> {
        self.inner
            .read()
            .await
            .papers
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Paper"))
    }

    async fn create_paper(&self, submission: NewPaper) -> Result<PaperSubmission> {
        let mut inner = self.inner.write().await;

        let id = inner.next_paper_id;
        inner.next_paper_id += 1;

        let paper = submission.into_submission(id);
        inner.papers.insert(0, paper.clone());
        Ok(paper)
    }

    async fn update_paper(&self, id: i64, update: PaperUpdate) -> Result<PaperSubmission> {
        let mut inner = self.inner.write().await;
        let paper = inner
            .papers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Paper"))?;

        update.apply_to(paper);
        Ok(paper.clone())
    }

    async fn delete_paper(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.papers.len();
        inner.papers.retain(|p| p.id != id);

        if inner.papers.len() == before {
            return Err(AppError::not_found("Paper"));
        }
        Ok(())
    }

    async fn attach_full_text(
        &self,
        id: i64,
        url: &str,
        file_name: &str,
    ) -> Result<PaperSubmission> {
        let mut inner = self.inner.write().await;
        let paper = inner
            .papers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Paper"))?;

        paper.full_text_status = ReviewStatus::Approved;
        paper.full_text_url = Some(url.to_string());
        paper.full_text_file_name = Some(file_name.to_string());
        Ok(paper.clone())
    }

    async fn detach_full_text(&self, id: i64) -> Result<PaperSubmission> {
        let mut inner = self.inner.write().await;
        let paper = inner
            .papers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Paper"))?;

        paper.full_text_status = ReviewStatus::Pending;
        paper.full_text_url = None;
        paper.full_text_file_name = None;
        Ok(paper.clone())
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        Ok(self.inner.read().await.announcements.clone())
    }

    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let mut inner = self.inner.write().await;

        let id = inner.next_announcement_id;
        inner.next_announcement_id += 1;

        let announcement = Announcement {
            id,
            title: announcement.title,
            date: today_display_date(),
            content: announcement.content,
            image_url: announcement.image_url,
        };
        inner.announcements.insert(0, announcement.clone());
        Ok(announcement)
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let mut inner = self.inner.write().await;
        let announcement = inner
            .announcements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("Announcement"))?;

        update.apply_to(announcement);
        Ok(announcement.clone())
    }

    async fn delete_announcement(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.announcements.len();
        inner.announcements.retain(|a| a.id != id);

        if inner.announcements.len() == before {
            return Err(AppError::not_found("Announcement"));
        }
        Ok(())
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>> {
        Ok(self.inner.read().await.registrations.clone())
    }

    async fn create_registration(&self, registration: NewRegistration) -> Result<Registration> {
        let mut inner = self.inner.write().await;

        let id = inner.next_registration_id;
        inner.next_registration_id += 1;

        let registration = Registration {
            id,
            name: registration.name,
            organization: registration.organization,
            email: registration.email,
            phone: registration.phone,
            with_paper: registration.with_paper,
        };
        inner.registrations.insert(0, registration.clone());
        Ok(registration)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_site_content(&self) -> Result<SiteContent> {
        self.inner
            .read()
            .await
            .site_content
            .clone()
            .ok_or_else(|| AppError::not_found("Site content"))
    }

    async fn patch_site_content(&self, patch: SiteContentPatch) -> Result<SiteContent> {
        let mut inner = self.inner.write().await;
        let content = inner
            .site_content
            .as_mut()
            .ok_or_else(|| AppError::not_found("Site content"))?;

        patch.apply_to(content);
        Ok(content.clone())
    }
}
