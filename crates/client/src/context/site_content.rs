//! Site content document mirror and editing operations

use crate::api::{ApiClient, Result};
use symposia_common::models::{
    ConferenceTopic, ImageKey, KeynoteSpeaker, NavLink, SiteContent, SiteContentPatch, Sponsor,
    SponsorKind,
};
use tokio::sync::RwLock;

/// Cached mirror of the single site content document.
///
/// Editing operations read the current document, compute the complete
/// new value for one top-level key, and send a patch carrying only that
/// key. The store merges shallowly, so arrays always travel whole.
pub struct SiteContentContext {
    api: ApiClient,
    content: RwLock<Option<SiteContent>>,
}

impl SiteContentContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            content: RwLock::new(None),
        }
    }

    /// Fetch the document into the cache
    pub async fn load(&self) -> Result<SiteContent> {
        let content = self.api.get_site_content().await?;
        *self.content.write().await = Some(content.clone());
        Ok(content)
    }

    /// Cached copy, if any load or update has happened yet
    pub async fn content(&self) -> Option<SiteContent> {
        self.content.read().await.clone()
    }

    /// Cached copy, fetching on a cold cache
    async fn current(&self) -> Result<SiteContent> {
        if let Some(content) = self.content.read().await.clone() {
            return Ok(content);
        }
        self.load().await
    }

    /// Send a patch and take the merged document from the server
    pub async fn update_content(&self, patch: SiteContentPatch) -> Result<SiteContent> {
        let content = self.api.update_site_content(patch).await?;
        *self.content.write().await = Some(content.clone());
        Ok(content)
    }

    // Keynote speakers

    /// Add a speaker; the embedded id is assigned here, not by the caller
    pub async fn add_keynote_speaker(&self, mut speaker: KeynoteSpeaker) -> Result<SiteContent> {
        let mut speakers = self.current().await?.keynote_speakers;
        speaker.id = next_embedded_id(speakers.iter().map(|s| s.id));
        speakers.push(speaker);

        self.update_content(SiteContentPatch {
            keynote_speakers: Some(speakers),
            ..Default::default()
        })
        .await
    }

    /// Replace the speaker carrying the same id
    pub async fn update_keynote_speaker(&self, speaker: KeynoteSpeaker) -> Result<SiteContent> {
        let speakers = self
            .current()
            .await?
            .keynote_speakers
            .into_iter()
            .map(|s| if s.id == speaker.id { speaker.clone() } else { s })
            .collect();

        self.update_content(SiteContentPatch {
            keynote_speakers: Some(speakers),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_keynote_speaker(&self, id: i64) -> Result<SiteContent> {
        let speakers = self
            .current()
            .await?
            .keynote_speakers
            .into_iter()
            .filter(|s| s.id != id)
            .collect();

        self.update_content(SiteContentPatch {
            keynote_speakers: Some(speakers),
            ..Default::default()
        })
        .await
    }

    // Sponsors and co-organizers; the kind picks the partition

    pub async fn add_sponsor(&self, kind: SponsorKind, mut sponsor: Sponsor) -> Result<SiteContent> {
        let mut sponsors = self.partition(kind).await?;
        sponsor.id = next_embedded_id(sponsors.iter().map(|s| s.id));
        sponsors.push(sponsor);

        self.update_content(sponsor_patch(kind, sponsors)).await
    }

    pub async fn update_sponsor(&self, kind: SponsorKind, sponsor: Sponsor) -> Result<SiteContent> {
        let sponsors = self
            .partition(kind)
            .await?
            .into_iter()
            .map(|s| if s.id == sponsor.id { sponsor.clone() } else { s })
            .collect();

        self.update_content(sponsor_patch(kind, sponsors)).await
    }

    pub async fn delete_sponsor(&self, kind: SponsorKind, id: i64) -> Result<SiteContent> {
        let sponsors = self
            .partition(kind)
            .await?
            .into_iter()
            .filter(|s| s.id != id)
            .collect();

        self.update_content(sponsor_patch(kind, sponsors)).await
    }

    async fn partition(&self, kind: SponsorKind) -> Result<Vec<Sponsor>> {
        let current = self.current().await?;
        Ok(match kind {
            SponsorKind::Sponsor => current.sponsors,
            SponsorKind::CoOrganizer => current.co_organizers,
        })
    }

    // Navigation links

    pub async fn add_nav_link(&self, mut link: NavLink) -> Result<SiteContent> {
        let mut links = self.current().await?.nav_links;
        link.id = next_embedded_id(links.iter().map(|l| l.id));
        links.push(link);

        self.update_content(SiteContentPatch {
            nav_links: Some(links),
            ..Default::default()
        })
        .await
    }

    pub async fn update_nav_link(&self, link: NavLink) -> Result<SiteContent> {
        let links = self
            .current()
            .await?
            .nav_links
            .into_iter()
            .map(|l| if l.id == link.id { link.clone() } else { l })
            .collect();

        self.update_content(SiteContentPatch {
            nav_links: Some(links),
            ..Default::default()
        })
        .await
    }

    pub async fn delete_nav_link(&self, id: i64) -> Result<SiteContent> {
        let links = self
            .current()
            .await?
            .nav_links
            .into_iter()
            .filter(|l| l.id != id)
            .collect();

        self.update_content(SiteContentPatch {
            nav_links: Some(links),
            ..Default::default()
        })
        .await
    }

    // Conference topics; the set of three is fixed, only edits happen

    pub async fn update_conference_topic(&self, topic: ConferenceTopic) -> Result<SiteContent> {
        let topics = self
            .current()
            .await?
            .conference_topics
            .into_iter()
            .map(|t| if t.id == topic.id { topic.clone() } else { t })
            .collect();

        self.update_content(SiteContentPatch {
            conference_topics: Some(topics),
            ..Default::default()
        })
        .await
    }

    // Scalar fields

    pub async fn update_hero_copy(
        &self,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Result<SiteContent> {
        self.update_content(SiteContentPatch {
            hero_title: Some(title.into()),
            hero_subtitle: Some(subtitle.into()),
            ..Default::default()
        })
        .await
    }

    pub async fn update_conference_details(
        &self,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<SiteContent> {
        self.update_content(SiteContentPatch {
            conference_date: Some(date.into()),
            conference_location: Some(location.into()),
            ..Default::default()
        })
        .await
    }

    /// Update a single named site image
    pub async fn update_image(&self, key: ImageKey, url: impl Into<String>) -> Result<SiteContent> {
        let url = url.into();
        let patch = match key {
            ImageKey::ConferenceLogo => SiteContentPatch {
                conference_logo: Some(url),
                ..Default::default()
            },
            ImageKey::UniversityLogo => SiteContentPatch {
                university_logo: Some(url),
                ..Default::default()
            },
            ImageKey::HeroBackground => SiteContentPatch {
                hero_background: Some(url),
                ..Default::default()
            },
            ImageKey::CallForPapersImage => SiteContentPatch {
                call_for_papers_image: Some(url),
                ..Default::default()
            },
        };

        self.update_content(patch).await
    }
}

/// Next id for a record embedded in the site document
fn next_embedded_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn sponsor_patch(kind: SponsorKind, sponsors: Vec<Sponsor>) -> SiteContentPatch {
    match kind {
        SponsorKind::Sponsor => SiteContentPatch {
            sponsors: Some(sponsors),
            ..Default::default()
        },
        SponsorKind::CoOrganizer => SiteContentPatch {
            co_organizers: Some(sponsors),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_embedded_id_starts_at_one() {
        assert_eq!(next_embedded_id(std::iter::empty()), 1);
    }

    #[test]
    fn test_next_embedded_id_is_max_plus_one() {
        assert_eq!(next_embedded_id(vec![3, 1, 2].into_iter()), 4);
        // Ids left by deletions are never reused out of order
        assert_eq!(next_embedded_id(vec![7, 2].into_iter()), 8);
    }

    #[test]
    fn test_sponsor_patch_targets_one_partition() {
        let patch = sponsor_patch(SponsorKind::CoOrganizer, Vec::new());
        assert!(patch.co_organizers.is_some());
        assert!(patch.sponsors.is_none());

        let patch = sponsor_patch(SponsorKind::Sponsor, Vec::new());
        assert!(patch.sponsors.is_some());
        assert!(patch.co_organizers.is_none());
    }
}
