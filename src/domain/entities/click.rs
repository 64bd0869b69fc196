//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// A click recorded when a live short code is resolved.
///
/// Captures client information (user agent, referrer) and network details
/// (IP address). `location` is a coarse placeholder that always mirrors `ip`;
/// no geolocation lookup is performed.
///
/// Clicks hold no reference to their mapping. The store keeps that association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub id: i64,
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
impl ClickEvent {
    /// Test constructor; `location` mirrors `ip` as in [`NewClick::into_event`].
    pub fn new(
        id: i64,
        clicked_at: DateTime<Utc>,
        referrer: Option<String>,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        let location = ip.clone();
        Self {
            id,
            clicked_at,
            referrer,
            ip,
            user_agent,
            location,
        }
    }
}

/// Input data for appending a click to a mapping's history.
///
/// The timestamp is supplied by the caller so that it matches the instant
/// used for the expiry check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub location: Option<String>,
}

impl NewClick {
    /// Stamps the new event with the store-assigned id.
    pub fn into_event(self, id: i64) -> ClickEvent {
        ClickEvent {
            id,
            clicked_at: self.clicked_at,
            referrer: self.referrer,
            ip: self.ip,
            user_agent: self.user_agent,
            location: self.location,
        }
    }
}
