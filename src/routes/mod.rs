//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the catalog, upload and order endpoints under a single
//! Axum router. Uploaded files are served back as static content under the
//! configured prefix so the stored path doubles as an image reference.

pub mod catalog;
pub mod orders;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(state.uploads.dir());
    let upload_prefix = state.uploads.url_prefix().to_owned();
    let upload_limit = DefaultBodyLimit::max(state.uploads.max_bytes());

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/catalog", get(catalog::list_catalog))
        .route("/api/backgrounds", post(catalog::create_background))
        .route(
            "/api/backgrounds/{id}",
            get(catalog::get_background).delete(catalog::delete_background),
        )
        .route("/api/backgrounds/{id}/geometry", patch(catalog::patch_background_geometry))
        .route("/api/backgrounds/{id}/overlays", post(catalog::create_overlay))
        .route("/api/backgrounds/{id}/overlays/{overlay_id}", delete(catalog::delete_overlay))
        .route(
            "/api/backgrounds/{id}/overlays/{overlay_id}/geometry",
            patch(catalog::patch_overlay_geometry),
        )
        .route("/api/upload", post(upload::upload).layer(upload_limit))
        .route("/api/orders", post(orders::submit_order))
        .nest_service(&upload_prefix, uploads)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
