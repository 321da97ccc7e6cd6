//! Download proxy services.
//!
//! [`ProxyService`] is the read-only context shared by every request: the
//! catalog, the resource library, a [`Fetcher`] and the service settings.
//! It is built once at startup and cloned cheaply into handlers.
//!
//! - single downloads: [`ProxyService::download_paper`], [`ProxyService::download_resource`]
//! - batch archives: [`ProxyService::resolve_batch`], [`ProxyService::stream_batch`]
//! - verification: [`ProxyService::verify_paper`]
//!
//! Every delivery path runs the fetched bytes through
//! [`crate::download::is_pdf`] before reporting success.

mod batch;
mod error;
mod settings;
mod single;
mod verify;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::download::Fetcher;
use crate::resources::ResourceLibrary;

pub use batch::{
    ArchivedItem, BATCH_CHANNEL_CAPACITY, BatchChunk, BatchSummary, ItemOutcome, SkipReason,
    SkippedItem, assemble_archive,
};
pub use error::{DeliveryError, ProxyError, SettingsError};
pub use settings::{MAX_BATCH_CONCURRENCY, MIN_BATCH_CONCURRENCY, ProxySettings};
pub use single::Delivery;
pub use verify::VerifyReport;

/// Shared, immutable request context.
#[derive(Clone)]
pub struct ProxyService {
    catalog: Arc<Catalog>,
    resources: Arc<ResourceLibrary>,
    fetcher: Arc<dyn Fetcher>,
    settings: ProxySettings,
}

impl std::fmt::Debug for ProxyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyService")
            .field("papers", &self.catalog.len())
            .field("resources", &self.resources.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ProxyService {
    /// Assembles the context.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        resources: ResourceLibrary,
        fetcher: Arc<dyn Fetcher>,
        settings: ProxySettings,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            resources: Arc::new(resources),
            fetcher,
            settings,
        }
    }

    /// The paper catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The auxiliary resource library.
    #[must_use]
    pub fn resources(&self) -> &ResourceLibrary {
        &self.resources
    }

    /// Service settings.
    #[must_use]
    pub fn settings(&self) -> ProxySettings {
        self.settings
    }
}
