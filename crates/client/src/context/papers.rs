//! Paper collection mirror

use crate::api::{ApiClient, Result};
use symposia_common::models::{
    NewPaper, PaperSubmission, PaperUpdate, PresentationStatus, ReviewStatus,
    UploadFullTextResponse,
};
use tokio::sync::RwLock;

/// Cached mirror of the paper collection.
///
/// Every mutator calls the API first and then replaces the local entry
/// with the server's response. Derived effects, like the status flip a
/// file attach causes, are never computed locally.
pub struct PaperContext {
    api: ApiClient,
    papers: RwLock<Vec<PaperSubmission>>,
}

impl PaperContext {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            papers: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full list into the cache. A failed fetch is logged and
    /// leaves the cache as it was.
    pub async fn load(&self) -> Result<()> {
        match self.api.list_papers().await {
            Ok(papers) => {
                *self.papers.write().await = papers;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load papers");
                Err(e)
            }
        }
    }

    /// Snapshot of the cached papers, newest first
    pub async fn papers(&self) -> Vec<PaperSubmission> {
        self.papers.read().await.clone()
    }

    /// Submit a paper and prepend the created record to the cache.
    /// Returns the record so callers can chain a full-text upload.
    pub async fn add_paper(&self, form: NewPaper) -> Result<PaperSubmission> {
        let paper = self.api.create_paper(form).await?;
        self.papers.write().await.insert(0, paper.clone());
        Ok(paper)
    }

    /// Delete a paper and drop it from the cache
    pub async fn delete_paper(&self, id: i64) -> Result<()> {
        let deleted = self.api.delete_paper(id).await?;
        self.papers.write().await.retain(|p| p.id != deleted.id);
        Ok(())
    }

    /// Merge-update a paper and take the server's record
    pub async fn update_paper_details(
        &self,
        id: i64,
        update: PaperUpdate,
    ) -> Result<PaperSubmission> {
        let paper = self.api.update_paper(id, update).await?;
        self.replace_entry(paper.clone()).await;
        Ok(paper)
    }

    pub async fn update_abstract_status(
        &self,
        id: i64,
        status: ReviewStatus,
    ) -> Result<PaperSubmission> {
        self.update_paper_details(
            id,
            PaperUpdate {
                abstract_status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update_full_text_status(
        &self,
        id: i64,
        status: ReviewStatus,
    ) -> Result<PaperSubmission> {
        self.update_paper_details(
            id,
            PaperUpdate {
                full_text_status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update_review_status(
        &self,
        id: i64,
        status: ReviewStatus,
    ) -> Result<PaperSubmission> {
        self.update_paper_details(
            id,
            PaperUpdate {
                review_status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update_presentation_status(
        &self,
        id: i64,
        status: PresentationStatus,
    ) -> Result<PaperSubmission> {
        self.update_paper_details(
            id,
            PaperUpdate {
                presentation_status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    /// Upload a full text and take the server's record
    pub async fn upload_full_text_file(
        &self,
        id: i64,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadFullTextResponse> {
        let response = self
            .api
            .upload_full_text(id, file_name, content_type, bytes)
            .await?;
        self.replace_entry(response.paper.clone()).await;
        Ok(response)
    }

    /// Remove the full text and take the server's record
    pub async fn delete_full_text_file(&self, id: i64) -> Result<PaperSubmission> {
        let response = self.api.delete_full_text(id).await?;
        self.replace_entry(response.paper.clone()).await;
        Ok(response.paper)
    }

    async fn replace_entry(&self, paper: PaperSubmission) {
        let mut papers = self.papers.write().await;
        match papers.iter_mut().find(|p| p.id == paper.id) {
            Some(slot) => *slot = paper,
            // A record mutated before the first load still becomes visible
            None => papers.insert(0, paper),
        }
    }
}
