//! Symposia Common Library
//!
//! Shared code for the conference services including:
//! - Domain models and wire types
//! - Database entities and connection management
//! - Store abstraction with memory and Postgres backends
//! - Blob storage for uploaded full texts
//! - Seed data for fresh deployments
//! - Error types and handling
//! - Configuration management
//! - Authentication utilities
//! - Metrics and observability

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use storage::BlobStore;
pub use store::ConferenceStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
