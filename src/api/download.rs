//! Single and batch download routes.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::HeaderName;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;

use super::{ApiError, AppState};
use crate::download::{ARCHIVE_FILENAME, content_disposition};
use crate::proxy::Delivery;

/// Number of papers the batch archive will attempt.
pub const BATCH_ITEMS_HEADER: HeaderName = HeaderName::from_static("x-batch-items");

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/download/batch", post(download_batch))
        .route("/download/{id}", get(download_paper))
}

async fn download_paper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let delivery = state.proxy.download_paper(&id).await?;
    Ok(pdf_attachment(delivery))
}

/// PDF body with attachment headers and an exact length.
pub(super) fn pdf_attachment(delivery: Delivery) -> Response {
    let headers = [
        (CONTENT_TYPE, "application/pdf".to_string()),
        (CONTENT_DISPOSITION, content_disposition(&delivery.filename)),
        (CONTENT_LENGTH, delivery.len().to_string()),
    ];
    (headers, delivery.body).into_response()
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    #[serde(default)]
    ids: Vec<String>,
}

/// Streams a zip of the requested papers. No `Content-Length`: the size is
/// known only once the last entry is written.
async fn download_batch(
    State(state): State<Arc<AppState>>,
    request: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request?;
    let entries = state.proxy.resolve_batch(&request.ids)?;
    let items = entries.len();

    // The summary is logged by the batch task itself.
    let (chunks, _summary) = state.proxy.stream_batch(entries);
    let body = Body::from_stream(ReceiverStream::new(chunks));

    let headers = [
        (CONTENT_TYPE, "application/zip".to_string()),
        (CONTENT_DISPOSITION, content_disposition(ARCHIVE_FILENAME)),
        (BATCH_ITEMS_HEADER, items.to_string()),
    ];
    Ok((headers, body).into_response())
}
