use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "message": "Bus Boarding Sequence Generator API is running"
    }))
}
