//! Store trait for short mappings and their click histories.

use crate::domain::entities::{ClickEvent, MappingHistory, NewClick, NewMapping, ShortMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable keyed store for mappings.
///
/// Implementations must make [`insert`](MappingStore::insert) an atomic
/// insert-if-absent and [`append_click`](MappingStore::append_click) atomic
/// with respect to concurrent appends on the same code. Expired mappings are
/// never removed, so a code stays taken for the lifetime of the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Returns true if a mapping with this exact code was ever inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Finds a mapping by its code, without its clicks.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortMapping))` if found, expired or not
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on store errors.
    async fn get(&self, code: &str) -> Result<Option<ShortMapping>, AppError>;

    /// Inserts a mapping only if its code is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists. A writer that
    /// loses a race on the same code observes this error, never success.
    async fn insert(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError>;

    /// Appends a click to the history of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on store errors.
    async fn append_click(&self, code: &str, new_click: NewClick) -> Result<ClickEvent, AppError>;

    /// Loads a mapping with its complete click history.
    ///
    /// Click order is unspecified; callers sort for display.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on store errors.
    async fn get_all(&self, code: &str) -> Result<Option<MappingHistory>, AppError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
