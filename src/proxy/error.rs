//! Error taxonomy for proxy services.

use thiserror::Error;

use super::settings::{MAX_BATCH_CONCURRENCY, MIN_BATCH_CONCURRENCY};
use crate::download::FetchError;

/// Failures surfaced by the download and verification services.
///
/// The display strings are client-facing; [`ProxyError::details`] carries the
/// underlying cause for fetch failures.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Unknown paper or resource identifier.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or empty request input.
    #[error("{0}")]
    BadRequest(String),

    /// The remote answered but the payload is not a PDF.
    #[error("Invalid PDF file received from source")]
    InvalidContent {
        /// Source URL that served the payload.
        url: String,
    },

    /// Timeout, connection failure or rejected remote status.
    #[error("Failed to download PDF")]
    Fetch(#[from] FetchError),
}

impl ProxyError {
    /// Creates a [`ProxyError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a [`ProxyError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Underlying cause worth showing to the caller, if any.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Fetch(source) => Some(source.to_string()),
            _ => None,
        }
    }
}

/// Why fetching a document for delivery failed.
///
/// Narrower than [`ProxyError`]: once an id has resolved, only the remote
/// fetch or the payload check can go wrong.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Timeout, connection failure or rejected remote status.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The payload does not start with the PDF signature.
    #[error("payload from {url} is not a PDF")]
    InvalidContent {
        /// Source URL that served the payload.
        url: String,
    },
}

impl From<DeliveryError> for ProxyError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::Fetch(source) => Self::Fetch(source),
            DeliveryError::InvalidContent { url } => Self::InvalidContent { url },
        }
    }
}

/// Invalid service settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Batch fan-out outside the supported range.
    #[error(
        "invalid batch concurrency {value}: must be between {MIN_BATCH_CONCURRENCY} and {MAX_BATCH_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The rejected value.
        value: usize,
    },

    /// A zero timeout.
    #[error("{name} timeout must be at least one second")]
    ZeroTimeout {
        /// Which timeout was zero.
        name: &'static str,
    },
}
