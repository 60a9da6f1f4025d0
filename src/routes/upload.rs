//! Image upload route.
//!
//! Accepts one multipart field named `file` and stores it through
//! `UploadStore`. Error bodies are plain text because the admin form shows
//! them verbatim.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::services::upload::UploadError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub path: String,
}

/// `POST /api/upload` — store an image, returning its public path.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    match receive_file(&state, &mut multipart).await {
        Ok(path) => Json(UploadResponse { path }).into_response(),
        Err(err) => upload_error_to_response(err),
    }
}

async fn receive_file(state: &AppState, multipart: &mut Multipart) -> Result<String, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field.bytes().await?;
        return state.uploads.save(&file_name, &bytes).await;
    }
    Err(UploadError::MissingFile)
}

pub(crate) fn upload_error_to_status(err: &UploadError) -> StatusCode {
    match err {
        UploadError::MissingFile => StatusCode::BAD_REQUEST,
        UploadError::Multipart(e) => e.status(),
        UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn upload_error_to_response(err: UploadError) -> Response {
    let status = upload_error_to_status(&err);
    match err {
        UploadError::MissingFile => {
            warn!("upload without file");
            (status, "No file uploaded").into_response()
        }
        UploadError::Multipart(e) => {
            warn!(error = %e, "malformed upload");
            (status, e.body_text()).into_response()
        }
        UploadError::Io(e) => {
            error!(error = %e, "upload failed");
            (status, "Error uploading file").into_response()
        }
    }
}
