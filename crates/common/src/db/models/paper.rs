//! Paper entity
//!
//! Statuses are stored as their display strings, matching what goes over
//! the wire. Column names are quoted camelCase in the schema.

use crate::models::{PaperSubmission, PresentationStatus, ReviewStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_name = "authorName", column_type = "Text")]
    pub author_name: String,

    #[sea_orm(column_type = "Text")]
    pub organization: String,

    #[sea_orm(column_name = "paperTitle", column_type = "Text")]
    pub paper_title: String,

    pub topic: i32,

    #[sea_orm(column_name = "abstractStatus", column_type = "Text")]
    pub abstract_status: String,

    #[sea_orm(column_name = "fullTextStatus", column_type = "Text")]
    pub full_text_status: String,

    #[sea_orm(column_name = "reviewStatus", column_type = "Text")]
    pub review_status: String,

    #[sea_orm(column_name = "presentationStatus", column_type = "Text")]
    pub presentation_status: String,

    #[sea_orm(column_name = "fullTextUrl", column_type = "Text", nullable)]
    pub full_text_url: Option<String>,

    #[sea_orm(column_name = "fullTextFileName", column_type = "Text", nullable)]
    pub full_text_file_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaperSubmission {
    fn from(row: Model) -> Self {
        PaperSubmission {
            id: row.id,
            author_name: row.author_name,
            organization: row.organization,
            paper_title: row.paper_title,
            topic: row.topic,
            abstract_status: ReviewStatus::from(row.abstract_status),
            full_text_status: ReviewStatus::from(row.full_text_status),
            review_status: ReviewStatus::from(row.review_status),
            presentation_status: PresentationStatus::from(row.presentation_status),
            full_text_url: row.full_text_url,
            full_text_file_name: row.full_text_file_name,
        }
    }
}
