//! Mapping entity representing a short code and its redirect target.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;

use super::click::ClickEvent;
use crate::error::AppError;

/// Validity applied when the creator does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// A short code mapped to its original URL.
///
/// All fields are immutable once the store has accepted the mapping. The
/// click history is not part of this record; see [`MappingHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortMapping {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShortMapping {
    /// Creates a new ShortMapping instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true if `now` is past the expiry instant.
    ///
    /// The expiry instant itself is still inside the validity window.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewMapping {
    /// Builds a mapping valid for `validity_minutes` (default 30) from `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the validity is below one minute or
    /// the resulting expiry is not representable.
    pub fn with_validity(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: Option<i64>,
    ) -> Result<Self, AppError> {
        let minutes = validity_minutes.unwrap_or(DEFAULT_VALIDITY_MINUTES);

        if minutes < 1 {
            return Err(AppError::bad_request(
                "Validity must be at least 1 minute",
                json!({ "validity": minutes }),
            ));
        }

        let expires_at = TimeDelta::try_minutes(minutes)
            .and_then(|delta| created_at.checked_add_signed(delta))
            .ok_or_else(|| {
                AppError::bad_request("Validity is too large", json!({ "validity": minutes }))
            })?;

        Ok(Self {
            code,
            original_url,
            created_at,
            expires_at,
        })
    }

    /// Replaces the code, keeping every other field.
    ///
    /// Used by the generator when a candidate collides and is retried.
    pub fn with_code(mut self, code: String) -> Self {
        self.code = code;
        self
    }
}

/// A mapping together with its full click history.
#[derive(Debug, Clone)]
pub struct MappingHistory {
    pub mapping: ShortMapping,
    pub clicks: Vec<ClickEvent>,
}

impl MappingHistory {
    /// Orders clicks most-recent-first; equal timestamps fall back to the newer id.
    pub fn into_recent_first(mut self) -> Self {
        self.clicks
            .sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));
        self
    }
}
