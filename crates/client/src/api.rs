//! HTTP client for the Symposia API
//!
//! One method per server endpoint. Error responses are decoded from the
//! uniform `{message}` body into [`ApiError::Api`].

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use symposia_common::errors::ErrorResponse;
use symposia_common::models::{
    Announcement, AnnouncementUpdate, DeleteFullTextResponse, DeletedResponse, LoginRequest,
    NewAnnouncement, NewPaper, NewRegistration, PaperSubmission, PaperUpdate, Registration,
    SiteContent, SiteContentPatch, UploadFullTextResponse, User,
};

/// Errors surfaced by [`ApiClient`]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with an error status and a `{message}` body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a server answer
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the Symposia HTTP API
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client rooted at the server's base URL (without `/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("HTTP {}", status),
        };

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // Auth

    /// Check credentials; a 401 means unknown user or wrong password
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.url("/login"))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let response = self.client.get(self.url("/users")).send().await?;
        Self::decode(response).await
    }

    // Registrations

    pub async fn list_registrations(&self) -> Result<Vec<Registration>> {
        let response = self.client.get(self.url("/registrations")).send().await?;
        Self::decode(response).await
    }

    pub async fn create_registration(&self, registration: NewRegistration) -> Result<Registration> {
        let response = self
            .client
            .post(self.url("/registrations"))
            .json(&registration)
            .send()
            .await?;
        Self::decode(response).await
    }

    // Announcements

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        let response = self.client.get(self.url("/announcements")).send().await?;
        Self::decode(response).await
    }

    pub async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let response = self
            .client
            .post(self.url("/announcements"))
            .json(&announcement)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_announcement(
        &self,
        id: i64,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let response = self
            .client
            .put(self.url(&format!("/announcements/{}", id)))
            .json(&update)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_announcement(&self, id: i64) -> Result<DeletedResponse> {
        let response = self
            .client
            .delete(self.url(&format!("/announcements/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    // Papers

    pub async fn list_papers(&self) -> Result<Vec<PaperSubmission>> {
        let response = self.client.get(self.url("/papers")).send().await?;
        Self::decode(response).await
    }

    pub async fn get_paper(&self, id: i64) -> Result<PaperSubmission> {
        let response = self
            .client
            .get(self.url(&format!("/papers/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn create_paper(&self, paper: NewPaper) -> Result<PaperSubmission> {
        let response = self
            .client
            .post(self.url("/papers"))
            .json(&paper)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_paper(&self, id: i64, update: PaperUpdate) -> Result<PaperSubmission> {
        let response = self
            .client
            .put(self.url(&format!("/papers/{}", id)))
            .json(&update)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_paper(&self, id: i64) -> Result<DeletedResponse> {
        let response = self
            .client
            .delete(self.url(&format!("/papers/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Upload a full-text file as the `file` part of a multipart form
    pub async fn upload_full_text(
        &self,
        id: i64,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadFullTextResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("/papers/{}/upload-fulltext", id)))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_full_text(&self, id: i64) -> Result<DeleteFullTextResponse> {
        let response = self
            .client
            .delete(self.url(&format!("/papers/{}/delete-fulltext", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    // Site content

    pub async fn get_site_content(&self) -> Result<SiteContent> {
        let response = self.client.get(self.url("/site-content")).send().await?;
        Self::decode(response).await
    }

    pub async fn update_site_content(&self, patch: SiteContentPatch) -> Result<SiteContent> {
        let response = self
            .client
            .put(self.url("/site-content"))
            .json(&patch)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3001/");
        assert_eq!(client.url("/papers"), "http://localhost:3001/api/papers");
    }

    #[test]
    fn test_api_error_displays_server_message() {
        let err = ApiError::Api {
            status: 404,
            message: "Paper not found".to_string(),
        };
        assert_eq!(err.to_string(), "Paper not found");
    }
}
