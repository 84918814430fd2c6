//! Conference registration handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::AppState;
use symposia_common::{
    errors::{AppError, Result},
    metrics,
    models::{NewRegistration, Registration},
};

/// List registrations, newest first
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>> {
    let registrations = state.store.list_registrations().await?;

    Ok(Json(registrations))
}

/// Register a participant
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<NewRegistration>,
) -> Result<(StatusCode, Json<Registration>)> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let registration = state.store.create_registration(request).await?;

    metrics::record_registration();

    tracing::info!(
        registration_id = registration.id,
        name = %registration.name,
        "Registration created"
    );

    Ok((StatusCode::CREATED, Json(registration)))
}
