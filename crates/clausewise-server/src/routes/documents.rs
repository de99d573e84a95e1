//! Document upload and retrieval routes.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use super::{api_error, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents", post(upload_document))
        .route("/documents/{document_id}", get(get_document))
}

/// POST /documents: Upload one file (multipart field `file`) and extract its text.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let limit_mb = state.config.max_upload_mb;
    let too_large = || {
        api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File too large. Limit is {} MB", limit_mb),
        )
    };

    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
            Err(e) => return Err(api_error(StatusCode::BAD_REQUEST, e.body_text())),
        };
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                api_error(StatusCode::BAD_REQUEST, e.body_text())
            }
        })?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No file uploaded"))?;

    if bytes.len() > state.config.max_upload_bytes() {
        warn!("Rejected upload {} ({} bytes)", filename, bytes.len());
        return Err(too_large());
    }

    let name = filename.clone();
    let extracted = tokio::task::spawn_blocking(move || {
        clausewise_ingest::extract_from_bytes(&name, &bytes)
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
    .map_err(|e| {
        warn!("Failed to parse {}: {}", filename, e);
        api_error(StatusCode::BAD_REQUEST, format!("Failed to parse file: {}", e))
    })?;

    let doc = state
        .documents
        .add(&filename, extracted.content_type, extracted.text);
    info!(
        "Stored document {} ({}, {} chars)",
        doc.document_id, doc.filename, doc.num_chars
    );

    Ok(Json(json!({
        "document_id": doc.document_id,
        "filename": doc.filename,
        "content_type": doc.content_type,
        "num_chars": doc.num_chars,
    })))
}

/// GET /documents/{document_id}: Full stored record including text.
async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<crate::store::StoredDocument>, ApiError> {
    state
        .documents
        .get(&document_id)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Document not found"))
}
