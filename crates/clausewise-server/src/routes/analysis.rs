//! Analysis routes: summarize, what-if and clause extraction.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use clausewise_analyze::{extract_clauses, extractive_summary, heuristic_whatif, DEFAULT_MAX_SENTENCES};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::{api_error, ApiError, ApiJson};
use crate::state::AppState;

pub const MIN_SUMMARY_SENTENCES: usize = 3;
pub const MAX_SUMMARY_SENTENCES: usize = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/whatif", post(whatif))
        .route("/clauses", post(clauses))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Extractive,
    Abstractive,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub mode: SummaryMode,
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

fn default_max_sentences() -> usize {
    DEFAULT_MAX_SENTENCES
}

#[derive(Debug, Deserialize)]
pub struct WhatIfRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    pub hypotheticals: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClausesRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Pick the text to analyze: inline text first, then a stored document.
fn resolve_text(
    state: &AppState,
    text: Option<String>,
    document_id: Option<&str>,
) -> Result<String, ApiError> {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        return Ok(text);
    }
    match document_id.filter(|id| !id.is_empty()) {
        Some(id) => state
            .documents
            .text(id)
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Document not found")),
        None => Err(api_error(
            StatusCode::BAD_REQUEST,
            "Provide text or document_id",
        )),
    }
}

/// POST /summarize
async fn summarize(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SummarizeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !(MIN_SUMMARY_SENTENCES..=MAX_SUMMARY_SENTENCES).contains(&req.max_sentences) {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "max_sentences must be between {} and {}",
                MIN_SUMMARY_SENTENCES, MAX_SUMMARY_SENTENCES
            ),
        ));
    }

    let text = resolve_text(&state, req.text, req.document_id.as_deref())?;

    let endpoint = state.llm_config.resolve_provider();
    if let (SummaryMode::Abstractive, Some(endpoint)) = (req.mode, endpoint) {
        let summary = clausewise_llm::tasks::abstractive_summary(&state.http, &endpoint, &text)
            .await
            .map_err(|e| {
                warn!("Abstractive summary failed: {}", e);
                api_error(StatusCode::BAD_GATEWAY, format!("LLM request failed: {}", e))
            })?;
        return Ok(Json(json!({
            "summary": summary,
            "mode": SummaryMode::Abstractive,
        })));
    }

    let summary = extractive_summary(&text, req.max_sentences);
    Ok(Json(json!({
        "summary": summary,
        "mode": SummaryMode::Extractive,
    })))
}

/// POST /whatif: LLM analysis when configured, keyword heuristic otherwise.
async fn whatif(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<WhatIfRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let text = resolve_text(&state, req.text, req.document_id.as_deref())?;
    if req.hypotheticals.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Provide at least one hypothetical",
        ));
    }

    let endpoint = state.llm_config.resolve_provider();
    if let Some(endpoint) = endpoint {
        match clausewise_llm::tasks::whatif(&state.http, &endpoint, &text, &req.hypotheticals).await
        {
            Ok(results) => return Ok(Json(json!({ "results": results }))),
            Err(e) => warn!("LLM what-if failed, using heuristic analysis: {}", e),
        }
    }

    let results = heuristic_whatif(&text, &req.hypotheticals);
    info!("Heuristic what-if answered {} hypotheticals", results.len());
    Ok(Json(json!({ "results": results })))
}

/// POST /clauses
async fn clauses(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ClausesRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let text = resolve_text(&state, req.text, req.document_id.as_deref())?;
    Ok(Json(json!({ "clauses": extract_clauses(&text) })))
}
