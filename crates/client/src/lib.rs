//! Client library for the Symposia API
//!
//! [`ApiClient`] offers one method per server endpoint. The [`context`]
//! module layers cached mirrors on top for UI-style consumers: each
//! context holds the last known server state and replaces entries with
//! the server's response after every mutation.

pub mod api;
pub mod context;

pub use api::{ApiClient, ApiError, Result};
pub use context::{
    AnnouncementContext, AuthContext, PaperContext, RegistrationContext, SiteContentContext,
};
