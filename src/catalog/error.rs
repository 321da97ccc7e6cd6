//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the paper catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("IO error reading catalog {path}: {source}")]
    Io {
        /// Catalog file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a JSON array of paper records.
    #[error("catalog does not match the paper schema: {source}")]
    Parse {
        /// The underlying JSON error (carries line and column).
        #[source]
        source: serde_json::Error,
    },

    /// A record has an empty identifier.
    #[error("catalog entry #{index} has an empty id")]
    EmptyId {
        /// Zero-based position of the record.
        index: usize,
    },

    /// Two records share an identifier.
    #[error("duplicate catalog id {id} at entries #{first} and #{second}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        second: usize,
    },

    /// A record's URL is not an absolute http(s) URL.
    #[error("catalog entry {id} has invalid url {url}")]
    InvalidUrl {
        /// Record identifier.
        id: String,
        /// The offending URL.
        url: String,
    },
}
