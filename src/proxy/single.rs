//! Single-item downloads.

use std::time::Duration;

use bytes::Bytes;
use tracing::{error, info, instrument, warn};

use super::{DeliveryError, ProxyError, ProxyService};
use crate::download::{FetchRequest, Fetcher, derive_filename, is_pdf};

/// A validated PDF ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Attachment filename.
    pub filename: String,
    /// PDF bytes.
    pub body: Bytes,
}

impl Delivery {
    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` for an empty body. Never the case for a validated PDF.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Fetches `url` and checks the PDF signature.
pub(crate) async fn fetch_pdf(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Duration,
) -> Result<Bytes, DeliveryError> {
    let response = fetcher.fetch(&FetchRequest::document(url, timeout)).await?;
    if is_pdf(&response.body) {
        Ok(response.body)
    } else {
        Err(DeliveryError::InvalidContent {
            url: url.to_string(),
        })
    }
}

impl ProxyService {
    /// Downloads one catalog paper.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::NotFound`] if `id` is not in the catalog
    /// - [`ProxyError::InvalidContent`] if the remote payload is not a PDF
    /// - [`ProxyError::Fetch`] on timeout, network failure or non-2xx status
    #[instrument(skip(self))]
    pub async fn download_paper(&self, id: &str) -> Result<Delivery, ProxyError> {
        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| ProxyError::not_found("Paper not found"))?;
        let body = self.deliver(id, &entry.url).await?;
        Ok(Delivery {
            filename: derive_filename(entry),
            body,
        })
    }

    /// Downloads one auxiliary resource (whole book or chapter).
    ///
    /// # Errors
    ///
    /// Same as [`ProxyService::download_paper`], against the resource index.
    #[instrument(skip(self))]
    pub async fn download_resource(&self, id: &str) -> Result<Delivery, ProxyError> {
        let item = self
            .resources
            .get(id)
            .ok_or_else(|| ProxyError::not_found("Resource not found"))?;
        let body = self.deliver(id, &item.url).await?;
        Ok(Delivery {
            filename: item.filename.clone(),
            body,
        })
    }

    async fn deliver(&self, id: &str, url: &str) -> Result<Bytes, ProxyError> {
        match fetch_pdf(self.fetcher.as_ref(), url, self.settings.download_timeout()).await {
            Ok(body) => {
                info!(id, url, bytes = body.len(), "download complete");
                Ok(body)
            }
            Err(DeliveryError::Fetch(source)) => {
                error!(id, url, reason = %source.reason(), error = %source, "download failed");
                Err(ProxyError::Fetch(source))
            }
            Err(err @ DeliveryError::InvalidContent { .. }) => {
                warn!(id, url, "remote payload is not a PDF");
                Err(err.into())
            }
        }
    }
}
