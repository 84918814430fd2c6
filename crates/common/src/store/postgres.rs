//! Postgres store backend
//!
//! Built on SeaORM entities plus one raw statement for the site content
//! JSONB merge. `ensure_schema` and `seed_if_empty` make a fresh database
//! usable without a separate migration step.

use super::{today_display_date, ConferenceStore};
use crate::db::models::{
    AnnouncementActiveModel, AnnouncementColumn, AnnouncementEntity, PaperActiveModel, PaperColumn,
    PaperEntity, RegistrationActiveModel, RegistrationColumn, RegistrationEntity,
    SiteContentActiveModel, SiteContentEntity, UserActiveModel, UserColumn, UserEntity,
    SITE_CONTENT_ID,
};
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::models::{
    Announcement, AnnouncementUpdate, NewAnnouncement, NewPaper, NewRegistration, PaperSubmission,
    PaperUpdate, Registration, ReviewStatus, SiteContent, SiteContentPatch, UserRecord,
};
use crate::seed::SeedData;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Statement,
};
use tracing::info;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    "passwordHash" TEXT NOT NULL,
    role TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS registrations (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    organization TEXT,
    email TEXT NOT NULL,
    phone TEXT,
    "withPaper" TEXT
);

CREATE TABLE IF NOT EXISTS announcements (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    date TEXT NOT NULL,
    content TEXT NOT NULL,
    "imageUrl" TEXT
);

CREATE TABLE IF NOT EXISTS papers (
    id BIGSERIAL PRIMARY KEY,
    "authorName" TEXT NOT NULL,
    organization TEXT NOT NULL,
    "paperTitle" TEXT NOT NULL,
    topic INTEGER NOT NULL,
    "abstractStatus" TEXT NOT NULL,
    "fullTextStatus" TEXT NOT NULL,
    "reviewStatus" TEXT NOT NULL,
    "presentationStatus" TEXT NOT NULL,
    "fullTextUrl" TEXT,
    "fullTextFileName" TEXT
);

CREATE TABLE IF NOT EXISTS site_content (
    id INTEGER PRIMARY KEY,
    content JSONB NOT NULL
);
"#;

pub struct PostgresStore {
    pool: DbPool,
}

impl PostgresStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create any missing tables.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.pool.conn().execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    /// Populate empty tables with the initial dataset. Tables that already
    /// hold rows are left alone, so restarts never clobber live data.
    pub async fn seed_if_empty(&self, data: SeedData) -> Result<()> {
        let conn = self.pool.conn();

        if UserEntity::find().count(conn).await? == 0 && !data.users.is_empty() {
            let rows: Vec<UserActiveModel> = data
                .users
                .into_iter()
                .map(|u| UserActiveModel {
                    id: Set(u.id),
                    username: Set(u.username),
                    password_hash: Set(u.password_hash),
                    role: Set(u.role),
                    email: Set(u.email),
                })
                .collect();
            UserEntity::insert_many(rows).exec(conn).await?;
            reset_sequence(conn, "users").await?;
            info!("Seeded users table");
        }

        if RegistrationEntity::find().count(conn).await? == 0 && !data.registrations.is_empty() {
            let rows: Vec<RegistrationActiveModel> = data
                .registrations
                .into_iter()
                .map(|r| RegistrationActiveModel {
                    id: Set(r.id),
                    name: Set(r.name),
                    organization: Set(r.organization),
                    email: Set(r.email),
                    phone: Set(r.phone),
                    with_paper: Set(r.with_paper),
                })
                .collect();
            RegistrationEntity::insert_many(rows).exec(conn).await?;
            reset_sequence(conn, "registrations").await?;
            info!("Seeded registrations table");
        }

        if AnnouncementEntity::find().count(conn).await? == 0 && !data.announcements.is_empty() {
            let rows: Vec<AnnouncementActiveModel> = data
                .announcements
                .into_iter()
                .map(|a| AnnouncementActiveModel {
                    id: Set(a.id),
                    title: Set(a.title),
                    date: Set(a.date),
                    content: Set(a.content),
                    image_url: Set(a.image_url),
                })
                .collect();
            AnnouncementEntity::insert_many(rows).exec(conn).await?;
            reset_sequence(conn, "announcements").await?;
            info!("Seeded announcements table");
        }

        if PaperEntity::find().count(conn).await? == 0 && !data.papers.is_empty() {
            let rows: Vec<PaperActiveModel> = data
                .papers
                .into_iter()
                .map(|p| PaperActiveModel {
                    id: Set(p.id),
                    author_name: Set(p.author_name),
                    organization: Set(p.organization),
                    paper_title: Set(p.paper_title),
                    topic: Set(p.topic),
                    abstract_status: Set(p.abstract_status.into()),
                    full_text_status: Set(p.full_text_status.into()),
                    review_status: Set(p.review_status.into()),
                    presentation_status: Set(p.presentation_status.into()),
                    full_text_url: Set(p.full_text_url),
                    full_text_file_name: Set(p.full_text_file_name),
                })
                .collect();
            PaperEntity::insert_many(rows).exec(conn).await?;
            reset_sequence(conn, "papers").await?;
            info!("Seeded papers table");
        }

        if SiteContentEntity::find_by_id(SITE_CONTENT_ID)
            .one(conn)
            .await?
            .is_none()
        {
            if let Some(content) = data.site_content {
                let row = SiteContentActiveModel {
                    id: Set(SITE_CONTENT_ID),
                    content: Set(serde_json::to_value(&content)?),
                };
                SiteContentEntity::insert(row).exec(conn).await?;
                info!("Seeded site_content table");
            }
        }

        Ok(())
    }
}

/// Move a serial sequence past the explicitly-assigned seed ids.
async fn reset_sequence(conn: &sea_orm::DatabaseConnection, table: &str) -> Result<()> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
    );
    conn.execute_unprepared(&sql).await?;
    Ok(())
}

#[async_trait]
impl ConferenceStore for PostgresStore {
    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    async fn list_papers(&self) -> Result<Vec<PaperSubmission>> {
        let rows = PaperEntity::find()
            .order_by_desc(PaperColumn::Id)
            .all(self.pool.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_paper(&self, id: i64) -> Result<PaperSubmission> {
        PaperEntity::find_by_id(id)
            .one(self.pool.conn())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found("Paper"))
    }

    async fn create_paper(&self, submission: NewPaper) -> Result<PaperSubmission> {
        // The placeholder id is never inserted; the sequence assigns one
        let paper = submission.into_submission(0);

        let row = PaperActiveModel {
            author_name: Set(paper.author_name),
            organization: Set(paper.organization),
            paper_title: Set(paper.paper_title),
            topic: Set(paper.topic),
            abstract_status: Set(paper.abstract_status.into()),
            full_text_status: Set(paper.full_text_status.into()),
            review_status: Set(paper.review_status.into()),
            presentation_status: Set(paper.presentation_status.into()),
            full_text_url: Set(None),
            full_text_file_name: Set(None),
            ..Default::default()
        }
        .insert(self.pool.conn())
        .await?;

        Ok(row.into())
    }

    async fn update_paper(&self, id: i64, update: PaperUpdate) -> Result<PaperSubmission> {
        let conn = self.pool.conn();
        let row = PaperEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found("Paper"))?;

        if update.is_empty() {
            return Ok(row.into());
        }

        let mut active: PaperActiveModel = row.into();
        if let Some(v) = update.author_name {
            active.author_name = Set(v);
        }
        if let Some(v) = update.organization {
            active.organization = Set(v);
        }
        if let Some(v) = update.paper_title {
            active.paper_title = Set(v);
        }
        if let Some(v) = update.topic {
            active.topic = Set(v);
        }
        if let Some(v) = update.abstract_status {
            active.abstract_status = Set(v.into());
        }
        if let Some(v) = update.full_text_status {
            active.full_text_status = Set(v.into());
        }
        if let Some(v) = update.review_status {
            active.review_status = Set(v.into());
        }
        if let Some(v) = update.presentation_status {
            active.presentation_status = Set(v.into());
        }

        let row = active.update(conn).await?;
        Ok(row.into())
    }

    async fn delete_paper(&self, id: i64) -> Result<()> {
        let result = PaperEntity::delete_by_id(id).exec(self.pool.conn()).await?;
        if result.rows_affected == 0 {
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
        let conn = self.pool.conn();
        let row = PaperEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found("Paper"))?;

        let mut active: PaperActiveModel = row.into();
        active.full_text_status = Set(ReviewStatus::Approved.into());
        active.full_text_url = Set(Some(url.to_string()));
        active.full_text_file_name = Set(Some(file_name.to_string()));

        let row = active.update(conn).await?;
        Ok(row.into())
    }

    async fn detach_full_text(&self, id: i64) -> Result<PaperSubmission> {
        let conn = self.pool.conn();
        let row = PaperEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found("Paper"))?;

        let mut active: PaperActiveModel = row.into();
        active.full_text_status = Set(ReviewStatus::Pending.into());
        active.full_text_url = Set(None);
        active.full_text_file_name = Set(None);

        let row = active.update(conn).await?;
        Ok(row.into())
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        let rows = AnnouncementEntity::find()
            .order_by_desc(AnnouncementColumn::Id)
            .all(self.pool.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let row = AnnouncementActiveModel {
            title: Set(announcement.title),
            date: Set(today_display_date()),
            content: Set(announcement.content),
            image_url: Set(announcement.image_url),
            ..Default::default()
        }
        .insert(self.pool.conn())
        .await?;

        Ok(row.into())
    }

    async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let conn = self.pool.conn();
        let row = AnnouncementEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement"))?;

        if update.is_empty() {
            return Ok(row.into());
        }

        let mut active: AnnouncementActiveModel = row.into();
        if let Some(v) = update.title {
            active.title = Set(v);
        }
        if let Some(v) = update.content {
            active.content = Set(v);
        }
        if let Some(v) = update.image_url {
            active.image_url = Set(Some(v));
        }

        let row = active.update(conn).await?;
        Ok(row.into())
    }

    async fn delete_announcement(&self, id: i64) -> Result<()> {
        let result = AnnouncementEntity::delete_by_id(id)
            .exec(self.pool.conn())
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Announcement"));
        }
        Ok(())
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>> {
        let rows = RegistrationEntity::find()
            .order_by_desc(RegistrationColumn::Id)
            .all(self.pool.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_registration(&self, registration: NewRegistration) -> Result<Registration> {
        let row = RegistrationActiveModel {
            name: Set(registration.name),
            organization: Set(registration.organization),
            email: Set(registration.email),
            phone: Set(registration.phone),
            with_paper: Set(registration.with_paper),
            ..Default::default()
        }
        .insert(self.pool.conn())
        .await?;

        Ok(row.into())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let rows = UserEntity::find()
            .order_by_asc(UserColumn::Id)
            .all(self.pool.conn())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(self.pool.conn())
            .await?;
        Ok(row.map(Into::into))
    }

    async fn get_site_content(&self) -> Result<SiteContent> {
        let row = SiteContentEntity::find_by_id(SITE_CONTENT_ID)
            .one(self.pool.conn())
            .await?
            .ok_or_else(|| AppError::not_found("Site content"))?;

        Ok(serde_json::from_value(row.content)?)
    }

    async fn patch_site_content(&self, patch: SiteContentPatch) -> Result<SiteContent> {
        // Shallow merge in the database: present top-level keys replace
        // stored keys, absent keys survive
        let payload = serde_json::to_value(&patch)?;
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE site_content SET content = content || $1::jsonb WHERE id = $2 RETURNING content",
            vec![payload.into(), SITE_CONTENT_ID.into()],
        );

        let row = self
            .pool
            .conn()
            .query_one(stmt)
            .await?
            .ok_or_else(|| AppError::not_found("Site content"))?;

        let content: serde_json::Value = row.try_get("", "content")?;
        Ok(serde_json::from_value(content)?)
    }
}
