//! HTTP API.
//!
//! [`router`] assembles:
//! - `GET /health`
//! - `/api/catalog`, `/api/catalog/filters`, `/api/catalog/stats`
//! - `GET /api/download/{id}`, `POST /api/download/batch`
//! - `GET /api/verify/{id}`
//! - `GET /api/resources`, `GET /api/resources/download/{id}`
//!
//! with permissive CORS and request tracing.

mod catalog;
mod download;
mod error;
mod health;
mod resources;
mod state;
mod verify;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::proxy::ProxyService;

pub use download::BATCH_ITEMS_HEADER;
pub use error::ApiError;
pub use state::AppState;

/// Builds the application router around `proxy`.
pub fn router(proxy: ProxyService) -> Router {
    let state = AppState::shared(proxy);

    let api = Router::new()
        .merge(catalog::router())
        .merge(download::router())
        .merge(verify::router())
        .merge(resources::router());

    Router::new()
        .merge(health::router())
        .nest("/api", api)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any)
}
