//! Announcement entity
//!
//! The date is stored as its display string (`DD/MM/YYYY`), assigned by
//! the server at creation time.

use crate::models::Announcement;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub date: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_name = "imageUrl", column_type = "Text", nullable)]
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Announcement {
    fn from(row: Model) -> Self {
        Announcement {
            id: row.id,
            title: row.title,
            date: row.date,
            content: row.content,
            image_url: row.image_url,
        }
    }
}
