//! Click history reporting service.

use std::sync::Arc;

use crate::domain::entities::{ClickEvent, ShortMapping};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use serde_json::json;

/// Full statistics for one mapping.
///
/// `clicks` is ordered most-recent-first and `total_clicks` always equals its length.
#[derive(Debug, Clone)]
pub struct DetailedStats {
    pub mapping: ShortMapping,
    pub total_clicks: usize,
    pub clicks: Vec<ClickEvent>,
}

/// Read-only service reconstructing a mapping's click history.
///
/// Expiry is not checked: expired mappings stay inspectable.
pub struct StatsService {
    store: Arc<dyn MappingStore>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Retrieves statistics for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping matches the code.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on store errors.
    pub async fn get_stats(&self, code: &str) -> Result<DetailedStats, AppError> {
        let history = self
            .store
            .get_all(code)
            .await?
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "code": code })))?
            .into_recent_first();

        Ok(DetailedStats {
            total_clicks: history.clicks.len(),
            mapping: history.mapping,
            clicks: history.clicks,
        })
    }
}
