//! Catalog listing, filter options and stats.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::catalog::{CatalogEntry, CatalogFilter, CatalogStats, FilterOptions};

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(list_catalog))
        .route("/catalog/filters", get(get_filters))
        .route("/catalog/stats", get(get_stats))
}

/// Raw query string. Values stay strings so empty ones can mean "no filter".
#[derive(Debug, Default, Deserialize)]
struct CatalogQuery {
    year: Option<String>,
    subject: Option<String>,
    region: Option<String>,
    set: Option<String>,
    #[serde(rename = "type")]
    paper_type: Option<String>,
    search: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CatalogQuery {
    /// Converts to a filter; a non-integer `year` is a bad request, while an
    /// integer no paper carries just yields an empty page.
    fn into_filter(self) -> Result<CatalogFilter, ApiError> {
        let year = match present(self.year) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::bad_request(format!("Invalid year: {raw}")))?,
            ),
            None => None,
        };
        Ok(CatalogFilter {
            year,
            subject: present(self.subject),
            region: present(self.region),
            set: present(self.set),
            paper_type: present(self.paper_type),
            search: present(self.search),
        })
    }
}

#[derive(Debug, Serialize)]
struct CatalogPage {
    total: usize,
    items: Vec<CatalogEntry>,
}

async fn list_catalog(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<CatalogPage>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let items: Vec<CatalogEntry> = state
        .proxy
        .catalog()
        .query(&filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(CatalogPage {
        total: items.len(),
        items,
    }))
}

async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.proxy.catalog().filter_options())
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.proxy.catalog().stats())
}
