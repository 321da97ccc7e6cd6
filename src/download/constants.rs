//! Constants for the download module (timeouts, redirects, archive naming).

use std::time::Duration;

/// Timeout for full-body document fetches (single and batch downloads).
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for HEAD verification probes.
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout for the shared client; per-request timeouts bound the rest.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirects followed per request.
pub const MAX_REDIRECTS: usize = 5;

/// Default number of batch items fetched concurrently.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Download name advertised for batch archives.
pub const ARCHIVE_FILENAME: &str = "CBSE_Papers.zip";
