//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::domain::repositories::MappingStore;

/// Services and settings shared across requests.
///
/// Cloning is cheap: every field is an `Arc` or a small value.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub store: Arc<dyn MappingStore>,
    /// Fixed short-link prefix; when `None` it is derived from each request.
    pub public_base_url: Option<String>,
    /// Trust `X-Forwarded-*` headers for client IP and request origin.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires all services onto a single store.
    pub fn new(
        store: Arc<dyn MappingStore>,
        public_base_url: Option<String>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone())),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            stats_service: Arc::new(StatsService::new(store.clone())),
            store,
            public_base_url,
            behind_proxy,
        }
    }
}
