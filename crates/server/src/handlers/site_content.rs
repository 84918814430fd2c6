//! Site content document handlers

use axum::{extract::State, Json};

use crate::AppState;
use symposia_common::{
    errors::Result,
    models::{SiteContent, SiteContentPatch},
};

/// Fetch the whole site content document
pub async fn get_site_content(State(state): State<AppState>) -> Result<Json<SiteContent>> {
    let content = state.store.get_site_content().await?;

    Ok(Json(content))
}

/// Shallow-merge a patch into the site content document
///
/// Present top-level keys replace the stored value wholesale (arrays
/// included); absent keys are untouched. There is no nested merge;
/// editors send complete arrays.
pub async fn update_site_content(
    State(state): State<AppState>,
    Json(patch): Json<SiteContentPatch>,
) -> Result<Json<SiteContent>> {
    let content = state.store.patch_site_content(patch).await?;

    tracing::info!("Site content updated");

    Ok(Json(content))
}
