//! Catalog record schema.

use serde::{Deserialize, Serialize};

/// One downloadable exam paper.
///
/// `region`, `set` and `code` are nullable in the source data; every other
/// field is required and a record missing one fails the catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique, stable, opaque identifier.
    pub id: String,
    /// Subject name, e.g. `Mathematics`.
    pub subject: String,
    /// Examination year.
    pub year: u16,
    /// Category, e.g. `Question Paper`, `Marking Scheme`, `Sample Paper`.
    #[serde(rename = "type")]
    pub paper_type: String,
    /// Examination region, e.g. `Delhi`, `Outside Delhi`, `Foreign`.
    pub region: Option<String>,
    /// Paper set number within a region.
    pub set: Option<String>,
    /// Board paper code, e.g. `65-1-1`.
    pub code: Option<String>,
    /// Display title.
    pub title: String,
    /// Absolute source URL on a third-party host.
    pub url: String,
}
