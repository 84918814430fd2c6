//! SeaORM entity models
//!
//! Database entities for the Symposia backend

mod announcement;
mod paper;
mod registration;
mod site_content;
mod user;

pub use paper::{
    Entity as PaperEntity,
    Model as PaperRow,
    ActiveModel as PaperActiveModel,
    Column as PaperColumn,
};

pub use user::{
    Entity as UserEntity,
    Model as UserRow,
    ActiveModel as UserActiveModel,
    Column as UserColumn,
};

pub use registration::{
    Entity as RegistrationEntity,
    Model as RegistrationRow,
    ActiveModel as RegistrationActiveModel,
    Column as RegistrationColumn,
};

pub use announcement::{
    Entity as AnnouncementEntity,
    Model as AnnouncementRow,
    ActiveModel as AnnouncementActiveModel,
    Column as AnnouncementColumn,
};

pub use site_content::{
    Entity as SiteContentEntity,
    Model as SiteContentRow,
    ActiveModel as SiteContentActiveModel,
    Column as SiteContentColumn,
    SITE_CONTENT_ID,
};
