//! HEAD-based availability checks.

use serde::Serialize;
use tracing::{debug, instrument};

use super::{ProxyError, ProxyService};
use crate::download::{FetchError, FetchRequest, StatusPolicy};

/// Outcome of probing a paper's source URL.
///
/// Remote failures are reported through `error` rather than as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReport {
    /// Catalog id.
    pub id: String,
    /// The remote answered 2xx with a PDF-like content type.
    pub valid: bool,
    /// Final HTTP status, when the remote answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// `Content-Type` as reported by the remote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// `Content-Length` as reported by the remote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Why the probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_pdf_like(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("pdf") || content_type.contains("octet-stream")
}

impl ProxyService {
    /// Probes a paper's URL with HEAD without downloading the body.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::NotFound`] only for an unknown id; every remote
    /// failure is reported inside the [`VerifyReport`].
    #[instrument(skip(self))]
    pub async fn verify_paper(&self, id: &str) -> Result<VerifyReport, ProxyError> {
        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| ProxyError::not_found("Paper not found"))?;

        let request = FetchRequest::head(&entry.url, self.settings.verify_timeout())
            .with_status_policy(StatusPolicy::RejectServerErrors);

        let report = match self.fetcher.fetch(&request).await {
            Ok(response) => {
                let content_type = response.content_type().map(str::to_string);
                let valid = response.is_success()
                    && content_type.as_deref().is_some_and(is_pdf_like);
                VerifyReport {
                    id: entry.id.clone(),
                    valid,
                    status: Some(response.status),
                    content_type,
                    size: response.content_length(),
                    error: None,
                }
            }
            Err(err) => {
                let status = match &err {
                    FetchError::HttpStatus { status, .. } => Some(*status),
                    _ => None,
                };
                VerifyReport {
                    id: entry.id.clone(),
                    valid: false,
                    status,
                    content_type: None,
                    size: None,
                    error: Some(err.to_string()),
                }
            }
        };
        debug!(id, valid = report.valid, status = ?report.status, "verified");
        Ok(report)
    }
}
