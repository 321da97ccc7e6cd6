//! Paper catalog loading, validation and querying.
//!
//! The catalog is a JSON array of [`CatalogEntry`] records produced out of
//! band before the process starts. It is validated once at load and then
//! shared read-only by every request handler.
//!
//! # Example
//!
//! ```
//! use paper_proxy::catalog::{Catalog, CatalogFilter};
//!
//! let json = r#"[{"id": "p1", "subject": "Economics", "year": 2022,
//!                 "type": "Question Paper", "region": "Delhi", "set": "1",
//!                 "code": null, "title": "Economics 2022",
//!                 "url": "https://files.example.org/eco.pdf"}]"#;
//! let catalog = Catalog::from_json_str(json).unwrap();
//! let filter = CatalogFilter { year: Some(2022), ..CatalogFilter::default() };
//! assert_eq!(catalog.query(&filter).len(), 1);
//! ```

mod entry;
mod error;
mod query;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use tracing::{debug, info};

use crate::download::parse_http_url;

pub use entry::CatalogEntry;
pub use error::CatalogError;
pub use query::{
    CatalogFilter, CatalogStats, FilterOptions, catalog_stats, filter_entries, filter_options,
};

/// Validated, immutable paper collection with an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyId`], [`CatalogError::DuplicateId`] or
    /// [`CatalogError::InvalidUrl`] for the first record that violates the
    /// schema. The whole catalog is rejected.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if parse_http_url(&entry.url).is_none() {
                return Err(CatalogError::InvalidUrl {
                    id: entry.id.clone(),
                    url: entry.url.clone(),
                });
            }
            match by_id.entry(entry.id.clone()) {
                Entry::Occupied(existing) => {
                    return Err(CatalogError::DuplicateId {
                        id: entry.id.clone(),
                        first: *existing.get(),
                        second: index,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
        debug!(papers = entries.len(), "catalog validated");
        Ok(Self { entries, by_id })
    }

    /// Parses and validates a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the document does not match the
    /// record schema, or a validation error from [`Catalog::from_entries`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse { source })?;
        Self::from_entries(entries)
    }

    /// Reads, parses and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Catalog::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), papers = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    /// All entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `filter`, in source order.
    #[must_use]
    pub fn query(&self, filter: &CatalogFilter) -> Vec<&CatalogEntry> {
        filter_entries(&self.entries, filter)
    }

    /// Distinct values per filterable attribute.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.entries)
    }

    /// Counts per subject, year and type.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        catalog_stats(&self.entries)
    }
}
