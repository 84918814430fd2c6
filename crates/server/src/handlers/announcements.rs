//! Announcement management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::AppState;
use symposia_common::{
    errors::{AppError, Result},
    models::{Announcement, AnnouncementUpdate, DeletedResponse, NewAnnouncement},
};

/// List announcements, newest first
pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>> {
    let announcements = state.store.list_announcements().await?;

    Ok(Json(announcements))
}

/// Create an announcement
///
/// The id and the display date are assigned server-side; client values
/// for either are ignored.
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(request): Json<NewAnnouncement>,
) -> Result<(StatusCode, Json<Announcement>)> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let announcement = state.store.create_announcement(request).await?;

    tracing::info!(
        announcement_id = announcement.id,
        title = %announcement.title,
        "Announcement created"
    );

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Merge-update an announcement
pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<AnnouncementUpdate>,
) -> Result<Json<Announcement>> {
    let announcement = state.store.update_announcement(id, update).await?;

    Ok(Json(announcement))
}

/// Delete an announcement
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>> {
    state.store.delete_announcement(id).await?;

    tracing::info!(announcement_id = id, "Announcement deleted");

    Ok(Json(DeletedResponse { id }))
}
