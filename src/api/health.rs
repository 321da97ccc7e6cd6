//! Health endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::AppState;
use crate::user_agent::service_identity;

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Returns `{"status": "ok", "service", "papers", "resources"}`.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": service_identity(),
        "papers": state.proxy.catalog().len(),
        "resources": state.proxy.resources().len(),
    }))
}
