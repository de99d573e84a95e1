//! Liveness and LLM status routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/llm/status", get(llm_status))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Legal AI Backend is running",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /llm/status: Which provider would serve LLM-backed requests.
async fn llm_status(State(state): State<Arc<AppState>>) -> Json<clausewise_llm::LLMStatus> {
    Json(state.llm_config.to_status())
}
