//! Cached mirrors of server state
//!
//! Each context pairs an [`ApiClient`](crate::ApiClient) with the last
//! known copy of one collection. Mutations call the API first and then
//! replace the local entry with the server's authoritative response;
//! nothing is computed optimistically on the client side.

mod announcements;
mod auth;
mod papers;
mod registrations;
mod site_content;

pub use announcements::AnnouncementContext;
pub use auth::AuthContext;
pub use papers::PaperContext;
pub use registrations::RegistrationContext;
pub use site_content::SiteContentContext;
