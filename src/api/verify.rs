//! `GET /api/verify/{id}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use super::{ApiError, AppState};
use crate::proxy::VerifyReport;

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/verify/{id}", get(verify_paper))
}

/// Always 200 for a known id; remote failures are reported in the body.
async fn verify_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VerifyReport>, ApiError> {
    Ok(Json(state.proxy.verify_paper(&id).await?))
}
