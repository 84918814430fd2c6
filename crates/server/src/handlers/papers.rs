//! Paper submission and review handlers

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::AppState;
use symposia_common::{
    errors::{AppError, Result},
    metrics,
    models::{
        DeleteFullTextResponse, DeletedResponse, NewPaper, PaperSubmission, PaperUpdate,
        UploadFullTextResponse,
    },
    storage,
};

/// List papers, newest first
pub async fn list_papers(State(state): State<AppState>) -> Result<Json<Vec<PaperSubmission>>> {
    let papers = state.store.list_papers().await?;

    Ok(Json(papers))
}

/// Get a paper by id
pub async fn get_paper(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PaperSubmission>> {
    let paper = state.store.get_paper(id).await?;

    Ok(Json(paper))
}

/// Submit a paper
///
/// Statuses are never taken from the client; every new submission starts
/// with an approved abstract and a pending full text and review.
pub async fn create_paper(
    State(state): State<AppState>,
    Json(request): Json<NewPaper>,
) -> Result<(StatusCode, Json<PaperSubmission>)> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let paper = state.store.create_paper(request).await?;

    metrics::record_paper_submitted(paper.topic);

    tracing::info!(
        paper_id = paper.id,
        author = %paper.author_name,
        topic = paper.topic,
        "Paper submitted"
    );

    Ok((StatusCode::CREATED, Json(paper)))
}

/// Merge-update a paper
///
/// Present fields overwrite, absent fields keep their stored value, so a
/// single-status update leaves the other three statuses untouched.
pub async fn update_paper(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<PaperUpdate>,
) -> Result<Json<PaperSubmission>> {
    update
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let touched: Vec<&str> = [
        ("abstractStatus", update.abstract_status.is_some()),
        ("fullTextStatus", update.full_text_status.is_some()),
        ("reviewStatus", update.review_status.is_some()),
        ("presentationStatus", update.presentation_status.is_some()),
    ]
    .iter()
    .filter(|(_, present)| *present)
    .map(|(field, _)| *field)
    .collect();

    let paper = state.store.update_paper(id, update).await?;

    for field in touched {
        metrics::record_status_update(field);
    }

    Ok(Json(paper))
}

/// Delete a paper
pub async fn delete_paper(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>> {
    let paper = state.store.get_paper(id).await?;

    // The attached file goes first; a blob failure must not block
    // record deletion.
    release_full_text_blob(&state, &paper).await;

    state.store.delete_paper(id).await?;

    tracing::info!(paper_id = id, "Paper deleted");

    Ok(Json(DeletedResponse { id }))
}

/// Attach an uploaded full text to a paper
///
/// Expects a `multipart/form-data` body with a `file` part. Accepts PDF,
/// DOC, and DOCX up to 10 MiB; a rejected upload leaves the paper
/// exactly as it was. Re-uploading replaces the previous file.
pub async fn upload_full_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<UploadFullTextResponse>> {
    let paper = state.store.get_paper(id).await?;

    let file = read_file_field(&mut multipart).await?;

    if !storage::is_allowed_full_text_type(&file.content_type) {
        metrics::record_full_text_upload("rejected_type");
        return Err(AppError::validation(format!(
            "Unsupported file type: {}. Allowed: PDF, DOC, DOCX",
            file.content_type
        )));
    }

    if file.bytes.len() > storage::MAX_FULL_TEXT_BYTES {
        metrics::record_full_text_upload("rejected_size");
        return Err(AppError::validation(format!(
            "File too large: {} bytes exceeds the {} byte limit",
            file.bytes.len(),
            storage::MAX_FULL_TEXT_BYTES
        )));
    }

    // Replacing an existing file releases the old blob first
    release_full_text_blob(&state, &paper).await;

    let key = storage::object_key(id, &file.name);
    let url = state.blobs.put(&key, file.bytes.to_vec()).await?;

    let paper = state.store.attach_full_text(id, &url, &file.name).await?;

    metrics::record_full_text_upload("accepted");

    tracing::info!(
        paper_id = id,
        file_name = %file.name,
        size_bytes = file.bytes.len(),
        "Full text uploaded"
    );

    Ok(Json(UploadFullTextResponse {
        paper,
        file_url: url,
    }))
}

/// Detach a paper's full text and release the stored file
pub async fn delete_full_text(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteFullTextResponse>> {
    let paper = state.store.get_paper(id).await?;

    release_full_text_blob(&state, &paper).await;

    let paper = state.store.detach_full_text(id).await?;

    tracing::info!(paper_id = id, "Full text removed");

    Ok(Json(DeleteFullTextResponse { paper }))
}

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Bytes,
}

/// Pull the `file` part out of a multipart form
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "file".to_string());
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read file: {}", e)))?;

        return Ok(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }

    Err(AppError::validation("Missing file field"))
}

/// Release the stored blob behind a paper's full text, if any.
///
/// Failures are logged and counted, never surfaced; the record
/// operations proceed and an orphaned blob is accepted.
async fn release_full_text_blob(state: &AppState, paper: &PaperSubmission) {
    let url = match paper.full_text_url.as_deref() {
        Some(url) => url,
        None => return,
    };

    let key = match state.blobs.key_for_url(url) {
        Some(key) => key,
        None => {
            tracing::warn!(
                paper_id = paper.id,
                url = url,
                "Full-text url does not map to a stored object"
            );
            metrics::record_blob_release_failure();
            return;
        }
    };

    if let Err(e) = state.blobs.delete(&key).await {
        tracing::warn!(
            paper_id = paper.id,
            key = %key,
            error = %e,
            "Failed to release full-text blob"
        );
        metrics::record_blob_release_failure();
    }
}
