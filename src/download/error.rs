//! Error types for remote fetches.
//!
//! Every failure carries the URL that was being fetched so logs and
//! client-facing `details` strings can name the remote that misbehaved.

use thiserror::Error;

/// Coarse failure class reported to callers (`timeout | network | http-status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureReason {
    /// The per-request timeout elapsed.
    Timeout,
    /// DNS, connect, TLS or body-read failure.
    Network,
    /// The remote answered with a status the caller's policy rejects.
    HttpStatus,
}

impl FetchFailureReason {
    /// Stable wire name for logs and JSON bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::HttpStatus => "http-status",
        }
    }
}

impl std::fmt::Display for FetchFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while fetching a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP status rejected by the request's status policy.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The provided URL is malformed or not absolute.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates a network error, promoting reqwest timeouts to [`FetchError::Timeout`].
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Failure class for this error.
    #[must_use]
    pub fn reason(&self) -> FetchFailureReason {
        match self {
            Self::Timeout { .. } => FetchFailureReason::Timeout,
            Self::HttpStatus { .. } => FetchFailureReason::HttpStatus,
            Self::Network { .. } | Self::InvalidUrl { .. } | Self::ClientBuild { .. } => {
                FetchFailureReason::Network
            }
        }
    }
}

// No `From<reqwest::Error>`: every variant needs the URL, which the source
// error does not reliably carry. Use `from_reqwest` at the call site.
