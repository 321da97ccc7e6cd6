//! Remote document fetching, validation, naming and archiving.
//!
//! # Features
//!
//! - Pooled HTTP client with browser User-Agent and a 5-redirect limit
//! - Per-request timeouts, optional byte ranges and origin referer
//! - PDF signature validation of fetched bytes
//! - Deterministic filenames shared by single and batch downloads
//! - Incremental zip assembly for streamed batch responses
//!
//! # Example
//!
//! ```no_run
//! use paper_proxy::download::{FetchRequest, Fetcher, HttpClient, is_pdf, DOWNLOAD_TIMEOUT};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let request = FetchRequest::document("https://example.com/paper.pdf", DOWNLOAD_TIMEOUT);
//! let response = client.fetch(&request).await?;
//! println!("valid pdf: {}", is_pdf(&response.body));
//! # Ok(())
//! # }
//! ```

mod archive;
mod client;
mod constants;
mod error;
mod filename;
mod validate;

pub use archive::{ArchiveError, StreamingArchive};
pub use client::{
    FetchMethod, FetchRequest, FetchResponse, Fetcher, HttpClient, StatusPolicy, parse_http_url,
};
pub use constants::{
    ARCHIVE_FILENAME, CONNECT_TIMEOUT, DEFAULT_BATCH_CONCURRENCY, DOWNLOAD_TIMEOUT, MAX_REDIRECTS,
    VERIFY_TIMEOUT,
};
pub use error::{FetchError, FetchFailureReason};
pub use filename::{
    archive_entry_path, content_disposition, derive_filename, sanitize_filename,
    underscore_whitespace,
};
pub use validate::{PDF_SIGNATURE, is_pdf};
