//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::proxy::ProxyService;

/// State shared across all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog, resources, fetcher and settings.
    pub proxy: ProxyService,
}

impl AppState {
    /// Wraps a service for use as router state.
    #[must_use]
    pub fn shared(proxy: ProxyService) -> Arc<Self> {
        Arc::new(Self { proxy })
    }
}
