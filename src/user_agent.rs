//! Shared request header values for outbound fetches.
//!
//! Exam-paper hosts routinely reject non-browser clients, so every request
//! presents itself as a desktop browser.

/// Browser User-Agent sent with every remote fetch.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept header for document downloads.
pub const PDF_ACCEPT: &str = "application/pdf,*/*";

/// Service name and version reported by the health endpoint.
#[must_use]
pub(crate) fn service_identity() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("paper-proxy/{version}")
}
