//! Catalog management routes.
//!
//! Reads return the current snapshot; writes go through the shared
//! `CatalogStore` so every client sees one consistent catalog. Unknown ids on
//! delete are not errors, matching the store's no-op semantics.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::catalog::{Background, Category};
use canvas::geometry::{Geometry, GeometryPatch};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub revision: u64,
    pub backgrounds: Vec<Background>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Deserialize)]
pub struct CreateBackgroundBody {
    pub label: String,
    pub image_ref: String,
}

#[derive(Deserialize)]
pub struct CreateOverlayBody {
    pub label: String,
    pub image_ref: String,
    pub category: Category,
    pub geometry: Option<Geometry>,
}

fn require_text(values: &[&str]) -> Result<(), StatusCode> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}

/// `GET /api/catalog` — full catalog snapshot.
pub async fn list_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.catalog.read().await;
    Json(CatalogResponse { revision: catalog.revision(), backgrounds: catalog.snapshot().to_vec() })
}

/// `GET /api/backgrounds/:id` — one background with its overlays.
pub async fn get_background(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Background>, StatusCode> {
    let catalog = state.catalog.read().await;
    catalog.background(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/backgrounds` — add a background covering the full canvas.
pub async fn create_background(
    State(state): State<AppState>,
    Json(body): Json<CreateBackgroundBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), StatusCode> {
    require_text(&[&body.label, &body.image_ref])?;
    let id = state.catalog.write().await.add_background(&body.label, &body.image_ref);
    info!(%id, label = %body.label, "background created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `DELETE /api/backgrounds/:id` — remove a background and its overlays.
pub async fn delete_background(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.catalog.write().await.remove_background(&id) {
        info!(%id, "background removed");
    }
    StatusCode::NO_CONTENT
}

/// `PATCH /api/backgrounds/:id/geometry` — merge a partial geometry.
pub async fn patch_background_geometry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<GeometryPatch>,
) -> StatusCode {
    let mut catalog = state.catalog.write().await;
    if catalog.background(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    catalog.update_background_geometry(&id, &patch);
    StatusCode::NO_CONTENT
}

/// `POST /api/backgrounds/:id/overlays` — attach an overlay. Geometry
/// defaults to the standard overlay placement.
pub async fn create_overlay(
    State(state): State<AppState>,
    Path(background_id): Path<String>,
    Json(body): Json<CreateOverlayBody>,
) -> Result<(StatusCode, Json<CreatedResponse>), StatusCode> {
    require_text(&[&body.label, &body.image_ref])?;
    let geometry = body.geometry.unwrap_or_else(Geometry::default_overlay);
    let id = state
        .catalog
        .write()
        .await
        .add_overlay(&background_id, &body.label, &body.image_ref, body.category, geometry)
        .ok_or(StatusCode::NOT_FOUND)?;
    info!(%background_id, %id, category = %body.category, "overlay created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `DELETE /api/backgrounds/:id/overlays/:overlay_id`
pub async fn delete_overlay(
    State(state): State<AppState>,
    Path((background_id, overlay_id)): Path<(String, String)>,
) -> StatusCode {
    if state.catalog.write().await.remove_overlay(&background_id, &overlay_id) {
        info!(%background_id, %overlay_id, "overlay removed");
    }
    StatusCode::NO_CONTENT
}

/// `PATCH /api/backgrounds/:id/overlays/:overlay_id/geometry`
pub async fn patch_overlay_geometry(
    State(state): State<AppState>,
    Path((background_id, overlay_id)): Path<(String, String)>,
    Json(patch): Json<GeometryPatch>,
) -> StatusCode {
    let mut catalog = state.catalog.write().await;
    if catalog.overlay(&background_id, &overlay_id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    catalog.update_overlay_geometry(&background_id, &overlay_id, &patch);
    StatusCode::NO_CONTENT
}
