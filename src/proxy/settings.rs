//! Timeouts and fan-out used by the proxy services.

use std::time::Duration;

use super::error::SettingsError;
use crate::download::{DEFAULT_BATCH_CONCURRENCY, DOWNLOAD_TIMEOUT, VERIFY_TIMEOUT};

/// Smallest batch fan-out (sequential fetching).
pub const MIN_BATCH_CONCURRENCY: usize = 1;

/// Largest batch fan-out.
pub const MAX_BATCH_CONCURRENCY: usize = 20;

/// Per-process service settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxySettings {
    download_timeout: Duration,
    verify_timeout: Duration,
    batch_concurrency: usize,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            download_timeout: DOWNLOAD_TIMEOUT,
            verify_timeout: VERIFY_TIMEOUT,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl ProxySettings {
    /// Validates and builds settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for a zero timeout or a batch concurrency
    /// outside `1..=20`.
    pub fn new(
        download_timeout: Duration,
        verify_timeout: Duration,
        batch_concurrency: usize,
    ) -> Result<Self, SettingsError> {
        if download_timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout { name: "download" });
        }
        if verify_timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout { name: "verify" });
        }
        if !(MIN_BATCH_CONCURRENCY..=MAX_BATCH_CONCURRENCY).contains(&batch_concurrency) {
            return Err(SettingsError::InvalidConcurrency {
                value: batch_concurrency,
            });
        }
        Ok(Self {
            download_timeout,
            verify_timeout,
            batch_concurrency,
        })
    }

    /// GET timeout for single and batch downloads.
    #[must_use]
    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }

    /// HEAD timeout for verification.
    #[must_use]
    pub fn verify_timeout(&self) -> Duration {
        self.verify_timeout
    }

    /// Number of batch items fetched concurrently.
    #[must_use]
    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }
}
