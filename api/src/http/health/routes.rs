use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::http::server::{AppState, SyncService};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn health_routes<S: SyncService>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health_check))
}
