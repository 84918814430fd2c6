//! Login and user listing handlers

use axum::{extract::State, Json};

use crate::AppState;
use symposia_common::{
    auth,
    errors::{AppError, Result},
    models::{LoginRequest, User},
};

/// Check credentials and return the matching user without the hash.
///
/// Unknown username and wrong password produce the same 401 so the
/// response does not reveal which half failed.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>> {
    let record = state
        .store
        .find_user_by_username(&request.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth::verify_password(&request.password, &record.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(
        username = %record.username,
        role = %record.role,
        "User logged in"
    );

    Ok(Json(User::from(record)))
}

/// List all users, password hashes stripped
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.store.list_users().await?;

    Ok(Json(users.into_iter().map(User::from).collect()))
}
