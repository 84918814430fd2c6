//! Blob storage for uploaded full-text files
//!
//! A put stores the bytes under a key and returns the public URL the rest
//! of the system carries around. Keys are flat strings derived from the
//! paper id, the current time, and a sanitized version of the original
//! filename, so nothing here needs directories or metadata.

use crate::config::BlobConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Hard cap on an accepted full-text file
pub const MAX_FULL_TEXT_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for a full-text upload (PDF, DOC, DOCX)
pub const ALLOWED_FULL_TEXT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Check an upload's declared content type against the accept list.
pub fn is_allowed_full_text_type(content_type: &str) -> bool {
    ALLOWED_FULL_TEXT_TYPES.contains(&content_type)
}

/// Replace every character outside `[A-Za-z0-9._-]` with an underscore.
pub fn sanitize_file_name(name: &str) -> String {
    let pattern = regex_lite::Regex::new(r"[^A-Za-z0-9._-]").unwrap();
    pattern.replace_all(name, "_").into_owned()
}

/// Build the storage key for a paper's full text.
pub fn object_key(paper_id: i64, file_name: &str) -> String {
    let name = if file_name.is_empty() {
        "file"
    } else {
        file_name
    };
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}-{}-{}", paper_id, millis, sanitize_file_name(name))
}

/// Trait for blob storage backends
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under the key and return their public URL.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String>;

    /// Remove the blob stored under the key. Deleting a missing key is an
    /// error; callers that treat release as best-effort log and move on.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Map a URL produced by `put` back to its key, if it is one of ours.
    fn key_for_url(&self, url: &str) -> Option<String>;
}

fn upload_url(public_base_url: &str, key: &str) -> String {
    format!("{}/uploads/{}", public_base_url.trim_end_matches('/'), key)
}

fn key_from_upload_url(public_base_url: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/uploads/", public_base_url.trim_end_matches('/'));
    url.strip_prefix(&prefix)
        .filter(|key| !key.is_empty())
        .map(String::from)
}

/// Keys come out of [`object_key`] and never contain path separators; a
/// key that does is not ours.
fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(AppError::Storage {
            message: format!("Invalid blob key: {:?}", key),
        });
    }
    Ok(())
}

/// In-memory blob store for tests and local development.
pub struct MemoryBlobStore {
    public_base_url: String,
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently held
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        check_key(key)?;
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(upload_url(&self.public_base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        check_key(key)?;
        if self.blobs.write().await.remove(key).is_none() {
            return Err(AppError::Storage {
                message: format!("Blob not found: {}", key),
            });
        }
        Ok(())
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        key_from_upload_url(&self.public_base_url, url)
    }
}

/// Blob store backed by a directory on local disk.
pub struct DiskBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl DiskBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStore for DiskBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String> {
        check_key(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        // Write to a temp name and rename, so a crash mid-write never
        // leaves a half file under the final key
        let tmp = self.root.join(format!("{}.{}.tmp", key, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, self.path_for(key)).await?;

        Ok(upload_url(&self.public_base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        check_key(key)?;
        let path = self.path_for(key);
        if !Path::new(&path).exists() {
            return Err(AppError::Storage {
                message: format!("Blob not found: {}", key),
            });
        }
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        key_from_upload_url(&self.public_base_url, url)
    }
}

/// Create a blob store based on configuration
pub fn create_blob_store(config: &BlobConfig) -> Arc<dyn BlobStore> {
    match config.backend.as_str() {
        "disk" => {
            info!(root = %config.root, "Using disk blob store");
            Arc::new(DiskBlobStore::new(
                config.root.clone(),
                config.public_base_url.clone(),
            ))
        }
        "memory" => Arc::new(MemoryBlobStore::new(config.public_base_url.clone())),
        other => {
            tracing::warn!(backend = other, "Unknown blob backend, using memory");
            Arc::new(MemoryBlobStore::new(config.public_base_url.clone()))
        }
    }
}
