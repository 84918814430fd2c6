//! Site content entity
//!
//! A single-row table: the whole site document lives in one JSONB column
//! under the fixed id 1.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed primary key of the one site content row
pub const SITE_CONTENT_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    #[sea_orm(column_type = "JsonBinary")]
    pub content: serde_json::Value,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
