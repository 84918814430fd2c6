//! API handlers module

pub mod announcements;
pub mod health;
pub mod papers;
pub mod registrations;
pub mod site_content;
pub mod users;
