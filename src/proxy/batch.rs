//! Batch downloads streamed as a zip archive.
//!
//! Items are fetched with bounded fan-out but appended strictly in
//! resolution order, and finished archive bytes are pushed to the response
//! body after each entry. A failed item is recorded as skipped and never
//! aborts the batch. Closing the receiving side stops the batch: in-flight
//! fetches are dropped and no new ones are issued.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::single::fetch_pdf;
use super::{DeliveryError, ProxyError, ProxyService};
use crate::catalog::CatalogEntry;
use crate::download::{ArchiveError, FetchFailureReason, Fetcher, StreamingArchive, archive_entry_path};

/// Archive chunks buffered between the assembler and the response body.
pub const BATCH_CHANNEL_CAPACITY: usize = 4;

/// One piece of the streamed archive. An `Err` aborts the response body.
pub type BatchChunk = Result<Bytes, io::Error>;

/// Result of processing one batch item.
pub type ItemOutcome = Result<ArchivedItem, SkippedItem>;

/// An item written to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedItem {
    /// Catalog id.
    pub id: String,
    /// Path inside the archive.
    pub path: String,
    /// Uncompressed size.
    pub bytes: usize,
}

/// Why an item was left out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The fetch failed.
    Fetch {
        /// Failure class.
        reason: FetchFailureReason,
        /// Error message.
        message: String,
    },
    /// The payload did not carry the PDF signature.
    InvalidContent,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { reason, message } => write!(f, "{reason}: {message}"),
            Self::InvalidContent => f.write_str("invalid-content"),
        }
    }
}

/// An item left out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Catalog id.
    pub id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Per-batch tally, logged when the batch ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items written, in archive order.
    pub archived: Vec<ArchivedItem>,
    /// Items left out, in processing order.
    pub skipped: Vec<SkippedItem>,
    /// The client went away before the archive was finished.
    pub cancelled: bool,
}

impl BatchSummary {
    /// Records one item outcome.
    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            Ok(item) => self.archived.push(item),
            Err(item) => self.skipped.push(item),
        }
    }

    /// Number of archived items.
    #[must_use]
    pub fn archived_count(&self) -> usize {
        self.archived.len()
    }

    /// Number of skipped items.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl ProxyService {
    /// Resolves requested ids against the catalog.
    ///
    /// Order follows `ids`; repeats keep their first position and unknown ids
    /// are dropped.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::BadRequest`] if `ids` is empty
    /// - [`ProxyError::NotFound`] if no id is known
    pub fn resolve_batch(&self, ids: &[String]) -> Result<Vec<CatalogEntry>, ProxyError> {
        if ids.is_empty() {
            return Err(ProxyError::bad_request("No paper IDs provided"));
        }
        let mut seen = HashSet::with_capacity(ids.len());
        let entries: Vec<CatalogEntry> = ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect();
        if entries.is_empty() {
            return Err(ProxyError::not_found("No papers found for provided IDs"));
        }
        debug!(
            requested = ids.len(),
            resolved = entries.len(),
            "batch resolved"
        );
        Ok(entries)
    }

    /// Spawns archive assembly for resolved entries.
    ///
    /// Returns the receiving side of the chunk channel and a handle yielding
    /// the summary. Dropping the receiver cancels the batch.
    #[must_use]
    pub fn stream_batch(
        &self,
        entries: Vec<CatalogEntry>,
    ) -> (mpsc::Receiver<BatchChunk>, JoinHandle<BatchSummary>) {
        let (tx, rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        let fetcher = Arc::clone(&self.fetcher);
        let settings = self.settings;
        let handle = tokio::spawn(async move {
            let requested = entries.len();
            match assemble_archive(
                fetcher,
                entries,
                settings.batch_concurrency(),
                settings.download_timeout(),
                tx.clone(),
            )
            .await
            {
                Ok(summary) => {
                    info!(
                        requested,
                        archived = summary.archived_count(),
                        skipped = summary.skipped_count(),
                        cancelled = summary.cancelled,
                        "batch finished"
                    );
                    summary
                }
                Err(err) => {
                    warn!(requested, error = %err, "batch archive aborted");
                    // The receiver may already be gone.
                    let _ = tx.send(Err(io::Error::other(err))).await;
                    BatchSummary::default()
                }
            }
        });
        (rx, handle)
    }
}

/// Fetches, validates and archives `entries`, sending archive bytes to `tx`.
///
/// At most `concurrency` fetches are in flight; appends happen in input
/// order. The archive is finalised after the last item, so the stream is a
/// well-formed zip even when every item was skipped.
///
/// # Errors
///
/// Returns [`ArchiveError`] if the zip writer fails. The bytes already sent
/// do not form a valid archive in that case.
#[instrument(skip_all, fields(items = entries.len(), concurrency = concurrency))]
pub async fn assemble_archive(
    fetcher: Arc<dyn Fetcher>,
    entries: Vec<CatalogEntry>,
    concurrency: usize,
    timeout: Duration,
    tx: mpsc::Sender<BatchChunk>,
) -> Result<BatchSummary, ArchiveError> {
    let mut archive = StreamingArchive::new();
    let mut summary = BatchSummary::default();
    let mut used_paths = HashSet::new();

    let mut fetches = stream::iter(entries)
        .map(|entry| {
            let fetcher = Arc::clone(&fetcher);
            async move {
                let fetched = fetch_pdf(fetcher.as_ref(), &entry.url, timeout).await;
                (entry, fetched)
            }
        })
        .buffered(concurrency.max(1));

    while let Some((entry, fetched)) = fetches.next().await {
        if tx.is_closed() {
            summary.cancelled = true;
            break;
        }
        let outcome = match fetched {
            Ok(body) => {
                let path = unique_path(&mut used_paths, archive_entry_path(&entry));
                archive.append(&path, &body)?;
                debug!(id = %entry.id, path = %path, bytes = body.len(), "archived");
                Ok(ArchivedItem {
                    id: entry.id,
                    path,
                    bytes: body.len(),
                })
            }
            Err(err) => {
                let reason = skip_reason(err);
                warn!(id = %entry.id, url = %entry.url, reason = %reason, "skipping batch item");
                Err(SkippedItem {
                    id: entry.id,
                    reason,
                })
            }
        };
        summary.record(outcome);

        let chunk = archive.take_ready();
        if !chunk.is_empty() && tx.send(Ok(chunk)).await.is_err() {
            summary.cancelled = true;
            break;
        }
    }
    drop(fetches);

    if summary.cancelled {
        debug!("client disconnected; batch stopped");
        return Ok(summary);
    }

    let tail = archive.finish()?;
    if !tail.is_empty() && tx.send(Ok(tail)).await.is_err() {
        summary.cancelled = true;
    }
    Ok(summary)
}

/// Suffixes `_2`, `_3`, ... before the extension when two papers share a path.
fn unique_path(used: &mut HashSet<String>, path: String) -> String {
    if used.insert(path.clone()) {
        return path;
    }
    let (stem, ext) = path.rsplit_once('.').unwrap_or((path.as_str(), ""));
    let mut n = 2;
    loop {
        let candidate = if ext.is_empty() {
            format!("{stem}_{n}")
        } else {
            format!("{stem}_{n}.{ext}")
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn skip_reason(err: DeliveryError) -> SkipReason {
    match err {
        DeliveryError::Fetch(source) => SkipReason::Fetch {
            reason: source.reason(),
            message: source.to_string(),
        },
        DeliveryError::InvalidContent { .. } => SkipReason::InvalidContent,
    }
}
