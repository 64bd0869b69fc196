//! Click recording for resolved short codes.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickEvent, NewClick};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// Request attributes captured for a redirect.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visit {
    pub referrer: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl Visit {
    /// Creates a visit, dropping empty header values.
    pub fn new(referrer: Option<&str>, ip: Option<String>, user_agent: Option<&str>) -> Self {
        let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            referrer: non_empty(referrer),
            ip: ip.filter(|s| !s.is_empty()),
            user_agent: non_empty(user_agent),
        }
    }
}

/// Coarse location for a client address.
///
/// Placeholder policy: the address itself. No geolocation service is consulted.
pub fn coarse_location(ip: Option<&str>) -> Option<String> {
    ip.map(str::to_string)
}

/// Appends immutable click events to a mapping's history.
///
/// Holds no state besides the store handle; ordering and atomicity come from
/// [`MappingStore::append_click`].
#[derive(Clone)]
pub struct ClickRecorder {
    store: Arc<dyn MappingStore>,
}

impl ClickRecorder {
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Records a click on `code` stamped with `clicked_at`.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged. A failed append is never dropped.
    pub async fn record(
        &self,
        code: &str,
        clicked_at: DateTime<Utc>,
        visit: Visit,
    ) -> Result<ClickEvent, AppError> {
        let location = coarse_location(visit.ip.as_deref());

        let new_click = NewClick {
            clicked_at,
            referrer: visit.referrer,
            ip: visit.ip,
            user_agent: visit.user_agent,
            location,
        };

        self.store.append_click(code, new_click).await
    }
}
