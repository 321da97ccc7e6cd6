//! Error types for the resource library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or flattening the resource library.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The library file could not be read.
    #[error("IO error reading resource library {path}: {source}")]
    Io {
        /// Library file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a subject-keyed map of book lists.
    #[error("resource library does not match the subject/book/chapter schema: {source}")]
    Parse {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A downloadable item has an empty identifier.
    #[error("resource in book {book} ({subject}) has an empty id")]
    EmptyId {
        /// Subject the book belongs to.
        subject: String,
        /// Book identifier.
        book: String,
    },

    /// Two downloadable items share an identifier.
    #[error("duplicate resource id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// An item's URL is not an absolute http(s) URL.
    #[error("resource {id} has invalid url {url}")]
    InvalidUrl {
        /// Item identifier.
        id: String,
        /// The offending URL.
        url: String,
    },
}
