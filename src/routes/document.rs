//! Document Routes
//!
//! Endpoints:
//! - POST /api/v1/document - Upload a document as a data URL, replacing the current one
//! - GET /api/v1/document - Status of the current document

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::chat::UploadSummary;
use crate::error::Result;
use crate::state::AppState;

/// Create the document router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(document_status).post(upload_document))
}

/// Upload request body
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// `data:application/pdf;base64,...` or bare base64
    pub file: String,
}

/// POST /api/v1/document
///
/// Extracts every page before answering. On failure the previous document
/// stays loaded.
async fn upload_document(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadSummary>> {
    let summary = state.session().upload(&request.file).await?;
    Ok(Json(summary))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatus {
    pub loaded: bool,
    pub pages: usize,
    pub characters: usize,
}

/// GET /api/v1/document
async fn document_status(State(state): State<AppState>) -> Json<DocumentStatus> {
    let corpus = state.session().corpus();
    Json(DocumentStatus {
        loaded: !corpus.is_empty(),
        pages: corpus.page_count(),
        characters: corpus.char_count(),
    })
}
