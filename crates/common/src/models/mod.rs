//! Domain models for the Symposia conference services
//!
//! All wire-facing types live here so the server and the API client agree on
//! one JSON shape (camelCase keys). Updates travel as typed patch structs with
//! one `Option<T>` per field: a present field overwrites the stored value, an
//! absent field leaves it untouched.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Review status for abstracts, full texts, and the overall review.
///
/// Wire and database representation is the Vietnamese display string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[serde(rename = "Duyệt")]
    Approved,
    #[serde(rename = "Không duyệt")]
    Rejected,
    #[serde(rename = "Đang chờ duyệt")]
    Pending,
}

impl From<String> for ReviewStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Duyệt" => ReviewStatus::Approved,
            "Không duyệt" => ReviewStatus::Rejected,
            "Đang chờ duyệt" => ReviewStatus::Pending,
            _ => ReviewStatus::Pending,
        }
    }
}

impl From<ReviewStatus> for String {
    fn from(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Approved => "Duyệt".to_string(),
            ReviewStatus::Rejected => "Không duyệt".to_string(),
            ReviewStatus::Pending => "Đang chờ duyệt".to_string(),
        }
    }
}

/// Whether a paper is scheduled for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationStatus {
    #[serde(rename = "Trình bày")]
    Presenting,
    #[serde(rename = "Không trình bày")]
    NotPresenting,
}

impl From<String> for PresentationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Trình bày" => PresentationStatus::Presenting,
            "Không trình bày" => PresentationStatus::NotPresenting,
            _ => PresentationStatus::NotPresenting,
        }
    }
}

impl From<PresentationStatus> for String {
    fn from(status: PresentationStatus) -> Self {
        match status {
            PresentationStatus::Presenting => "Trình bày".to_string(),
            PresentationStatus::NotPresenting => "Không trình bày".to_string(),
        }
    }
}

/// A submitted paper with its four independent review dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSubmission {
    pub id: i64,
    pub author_name: String,
    pub organization: String,
    pub paper_title: String,
    /// Track (tiểu ban) the paper belongs to: 1, 2, or 3
    pub topic: i32,
    pub abstract_status: ReviewStatus,
    pub full_text_status: ReviewStatus,
    pub review_status: ReviewStatus,
    pub presentation_status: PresentationStatus,
    /// Set together with `full_text_file_name` when a file is attached,
    /// cleared together when it is detached
    pub full_text_url: Option<String>,
    pub full_text_file_name: Option<String>,
}

/// Submission form payload. Any status or file fields a client sends are
/// dropped during deserialization; creation always applies the defaults.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPaper {
    #[validate(length(min = 1, max = 255))]
    pub author_name: String,

    #[validate(length(min = 1, max = 255))]
    pub organization: String,

    #[validate(length(min = 1, max = 1000))]
    pub paper_title: String,

    /// Accepted as a JSON number or a numeric string (HTML forms send strings)
    #[validate(range(min = 1, max = 3))]
    #[serde(deserialize_with = "topic_from_number_or_string")]
    pub topic: i32,
}

/// Deserialize the submission topic from either `2` or `"2"`.
fn topic_from_number_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid topic: {:?}", s))),
    }
}

impl NewPaper {
    /// Build the stored record for a fresh submission. Every new paper
    /// starts with an approved abstract, a pending full text and review,
    /// no presentation slot, and no attached file.
    pub fn into_submission(self, id: i64) -> PaperSubmission {
        PaperSubmission {
            id,
            author_name: self.author_name,
            organization: self.organization,
            paper_title: self.paper_title,
            topic: self.topic,
            abstract_status: ReviewStatus::Approved,
            full_text_status: ReviewStatus::Pending,
            review_status: ReviewStatus::Pending,
            presentation_status: PresentationStatus::NotPresenting,
            full_text_url: None,
            full_text_file_name: None,
        }
    }
}

/// Coalesce-style patch for a paper: present fields overwrite, absent fields
/// keep their prior value. The full-text url/filename pair is not patchable;
/// it changes only through the attach/detach operations.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaperUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_title: Option<String>,

    #[validate(range(min = 1, max = 3))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_status: Option<ReviewStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_status: Option<ReviewStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_status: Option<PresentationStatus>,
}

impl PaperUpdate {
    /// True when no field is present and applying would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.author_name.is_none()
            && self.organization.is_none()
            && self.paper_title.is_none()
            && self.topic.is_none()
            && self.abstract_status.is_none()
            && self.full_text_status.is_none()
            && self.review_status.is_none()
            && self.presentation_status.is_none()
    }

    /// Apply the present fields onto a paper record.
    pub fn apply_to(&self, paper: &mut PaperSubmission) {
        if let Some(ref v) = self.author_name {
            paper.author_name = v.clone();
        }
        if let Some(ref v) = self.organization {
            paper.organization = v.clone();
        }
        if let Some(ref v) = self.paper_title {
            paper.paper_title = v.clone();
        }
        if let Some(v) = self.topic {
            paper.topic = v;
        }
        if let Some(v) = self.abstract_status {
            paper.abstract_status = v;
        }
        if let Some(v) = self.full_text_status {
            paper.full_text_status = v;
        }
        if let Some(v) = self.review_status {
            paper.review_status = v;
        }
        if let Some(v) = self.presentation_status {
            paper.presentation_status = v;
        }
    }
}

/// The single editable site document: navigation, speakers, sponsors,
/// topics, hero copy, and named images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub conference_logo: String,
    pub university_logo: String,
    pub hero_background: String,
    pub call_for_papers_image: String,
    pub keynote_speakers: Vec<KeynoteSpeaker>,
    pub conference_topics: Vec<ConferenceTopic>,
    pub sponsors: Vec<Sponsor>,
    pub co_organizers: Vec<Sponsor>,
    pub nav_links: Vec<NavLink>,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub conference_date: String,
    pub conference_location: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeynoteSpeaker {
    pub id: i64,
    pub name: String,
    pub affiliation: String,
    pub image_url: String,
    pub bio: String,
    pub keynote_topic: String,
}

/// Sponsors and co-organizers share this shape; they differ only in which
/// partition of the site document they live in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
}

/// Navigation entry with at most one level of nesting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub id: i64,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavLink>>,
}

/// One of the three fixed conference tracks. The set never grows or
/// shrinks; only titles, images, and descriptions are editable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceTopic {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub link: String,
    pub description: String,
}

/// Shallow top-level patch for the site document. A present key replaces
/// the stored key wholesale -- arrays included, there is no element-wise
/// merge. Absent keys are untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_logo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_logo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_for_papers_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keynote_speakers: Option<Vec<KeynoteSpeaker>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_topics: Option<Vec<ConferenceTopic>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsors: Option<Vec<Sponsor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_organizers: Option<Vec<Sponsor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_links: Option<Vec<NavLink>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_location: Option<String>,
}

impl SiteContentPatch {
    /// Apply the present keys onto a site document (the in-memory
    /// equivalent of the JSONB `content || patch` merge).
    pub fn apply_to(&self, content: &mut SiteContent) {
        if let Some(ref v) = self.conference_logo {
            content.conference_logo = v.clone();
        }
        if let Some(ref v) = self.university_logo {
            content.university_logo = v.clone();
        }
        if let Some(ref v) = self.hero_background {
            content.hero_background = v.clone();
        }
        if let Some(ref v) = self.call_for_papers_image {
            content.call_for_papers_image = v.clone();
        }
        if let Some(ref v) = self.keynote_speakers {
            content.keynote_speakers = v.clone();
        }
        if let Some(ref v) = self.conference_topics {
            content.conference_topics = v.clone();
        }
        if let Some(ref v) = self.sponsors {
            content.sponsors = v.clone();
        }
        if let Some(ref v) = self.co_organizers {
            content.co_organizers = v.clone();
        }
        if let Some(ref v) = self.nav_links {
            content.nav_links = v.clone();
        }
        if let Some(ref v) = self.hero_title {
            content.hero_title = v.clone();
        }
        if let Some(ref v) = self.hero_subtitle {
            content.hero_subtitle = v.clone();
        }
        if let Some(ref v) = self.conference_date {
            content.conference_date = v.clone();
        }
        if let Some(ref v) = self.conference_location {
            content.conference_location = v.clone();
        }
    }
}

/// Selects which partition of the site document a sponsor operation
/// targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SponsorKind {
    Sponsor,
    CoOrganizer,
}

/// Names one of the editable site images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKey {
    ConferenceLogo,
    UniversityLogo,
    HeroBackground,
    CallForPapersImage,
}

/// Public announcement. `id` and `date` are server-assigned; the date is
/// the creation day formatted `DD/MM/YYYY`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[serde(default)]
    pub image_url: Option<String>,
}

/// Merge patch for an announcement; `id` and `date` are never
/// client-writable.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl AnnouncementUpdate {
    /// True when no field is present and applying would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }

    pub fn apply_to(&self, announcement: &mut Announcement) {
        if let Some(ref v) = self.title {
            announcement.title = v.clone();
        }
        if let Some(ref v) = self.content {
            announcement.content = v.clone();
        }
        if let Some(ref v) = self.image_url {
            announcement.image_url = Some(v.clone());
        }
    }
}

/// Attendee registration. Create and list only; there is no update flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub name: String,
    pub organization: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// "yes" when the attendee also submits a paper
    pub with_paper: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub organization: Option<String>,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub with_paper: Option<String>,
}

/// Stored user including the password hash. Never serialized to the wire;
/// handlers convert to [`User`] before responding.
#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub email: String,
}

/// Wire-facing user: the stored record minus the password hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub email: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            role: record.role,
            email: record.email,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from the full-text upload operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFullTextResponse {
    pub paper: PaperSubmission,
    pub file_url: String,
}

/// Response from the full-text detach operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteFullTextResponse {
    pub paper: PaperSubmission,
}

/// Response from record deletion: the id that was removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
}
