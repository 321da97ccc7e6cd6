//! Auxiliary resource browsing and download.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::download::pdf_attachment;
use super::{ApiError, AppState};

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/download/{id}", get(download_resource))
}

#[derive(Debug, Deserialize)]
struct ResourceQuery {
    subject: Option<String>,
}

/// Without `subject`: `{"subjects": [...]}`. With it: that subject's books.
async fn list_resources(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ResourceQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let resources = state.proxy.resources();
    match query.subject.filter(|s| !s.is_empty()) {
        None => Ok(Json(json!({ "subjects": resources.subject_names() })).into_response()),
        Some(subject) => {
            let record = resources
                .subject(&subject)
                .ok_or_else(|| ApiError::not_found("Subject not found"))?;
            Ok(Json(record).into_response())
        }
    }
}

async fn download_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let delivery = state.proxy.download_resource(&id).await?;
    Ok(pdf_attachment(delivery))
}
