//! Expiry-aware resolution of short codes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::click_recorder::{ClickRecorder, Visit};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// Resolves short codes to their targets and records a click per success.
///
/// The clock is read once per resolution; the same instant drives the expiry
/// check and stamps the click.
pub struct RedirectService {
    store: Arc<dyn MappingStore>,
    recorder: ClickRecorder,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        let recorder = ClickRecorder::new(store.clone());
        Self { store, recorder }
    }

    /// Resolves `code` at the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_at`].
    pub async fn resolve(&self, code: &str, visit: Visit) -> Result<String, AppError> {
        self.resolve_at(code, visit, Utc::now()).await
    }

    /// Resolves `code` as of `now` and returns the original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never issued.
    /// Returns [`AppError::Expired`] if `now` is past the mapping's expiry; no
    /// click is recorded in that case.
    /// Returns the store error if the click could not be appended.
    pub async fn resolve_at(
        &self,
        code: &str,
        visit: Visit,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let mapping = self
            .store
            .get(code)
            .await?
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "code": code })))?;

        if mapping.is_expired_at(now) {
            return Err(AppError::expired(
                "Short link expired",
                json!({ "code": code, "expired_at": mapping.expires_at }),
            ));
        }

        self.recorder.record(&mapping.code, now, visit).await?;

        Ok(mapping.original_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortMapping;
    use crate::domain::repositories::MockMappingStore;
    use chrono::Duration;

    fn mapping_expiring_at(expires_at: DateTime<Utc>) -> ShortMapping {
        ShortMapping::new(
            1,
            "abc123".to_string(),
            "https://example.com/target".to_string(),
            expires_at - Duration::minutes(30),
            expires_at,
        )
    }

    #[tokio::test]
    async fn test_resolve_live_code_records_click() {
        let mut mock_store = MockMappingStore::new();
        let now = Utc::now();
        let mapping = mapping_expiring_at(now + Duration::minutes(10));

        mock_store
            .expect_get()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_store
            .expect_append_click()
            .withf(move |code, click| {
                code == "abc123"
                    && click.clicked_at == now
                    && click.ip.as_deref() == Some("192.168.1.1")
                    && click.location.as_deref() == Some("192.168.1.1")
            })
            .times(1)
            .returning(|_, click| Ok(click.into_event(1)));

        let service = RedirectService::new(Arc::new(mock_store));
        let visit = Visit::new(None, Some("192.168.1.1".to_string()), Some("Mozilla/5.0"));

        let url = service.resolve_at("abc123", visit, now).await.unwrap();

        assert_eq!(url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_store = MockMappingStore::new();

        mock_store.expect_get().times(1).returning(|_| Ok(None));
        mock_store.expect_append_click().times(0);

        let service = RedirectService::new(Arc::new(mock_store));

        let err = service
            .resolve("missing", Visit::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_code_records_nothing() {
        let mut mock_store = MockMappingStore::new();
        let now = Utc::now();
        let mapping = mapping_expiring_at(now - Duration::seconds(1));

        mock_store
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_store.expect_append_click().times(0);

        let service = RedirectService::new(Arc::new(mock_store));

        let err = service
            .resolve_at("abc123", Visit::default(), now)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Expired { .. }));
        assert!(err.is_unusable_code());
    }

    #[tokio::test]
    async fn test_resolve_at_exact_expiry_is_allowed() {
        let mut mock_store = MockMappingStore::new();
        let now = Utc::now();
        let mapping = mapping_expiring_at(now);

        mock_store
            .expect_get()
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_store
            .expect_append_click()
            .times(1)
            .returning(|_, click| Ok(click.into_event(1)));

        let service = RedirectService::new(Arc::new(mock_store));

        assert!(
            service
                .resolve_at("abc123", Visit::default(), now)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_resolve_surfaces_append_failure() {
        let mut mock_store = MockMappingStore::new();
        let now = Utc::now();
        let mapping = mapping_expiring_at(now + Duration::minutes(1));

        mock_store
            .expect_get()
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_store
            .expect_append_click()
            .times(1)
            .returning(|_, _| Err(AppError::unavailable("Store unavailable", json!({}))));

        let service = RedirectService::new(Arc::new(mock_store));

        let err = service
            .resolve_at("abc123", Visit::default(), now)
            .await
            .unwrap_err();

        assert!(err.is_transient());
    }
}
