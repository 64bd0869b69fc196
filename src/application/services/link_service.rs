//! Mapping creation and code generation service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewMapping, ShortMapping};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use crate::utils::code_generator::{
    MAX_GENERATION_ATTEMPTS, generate_code, is_reserved_code, validate_custom_code,
};
use crate::utils::short_link::build_short_link;
use crate::utils::url_validator::validate_target_url;

/// Service for creating short mappings.
///
/// Validates input, picks a code (custom or generated) and hands the mapping
/// to the store's insert-if-absent. A lost insert race is a collision, never a
/// success.
pub struct LinkService {
    store: Arc<dyn MappingStore>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Creates a short mapping starting now.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The redirect target, stored as submitted
    /// - `validity_minutes` - Lifetime in minutes (default 30, at least 1)
    /// - `custom_code` - Optional owner-chosen code; an empty string counts as absent
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL, validity or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is already taken.
    /// Returns [`AppError::Exhausted`] if no free code was found within the attempt budget.
    pub async fn create_short_link(
        &self,
        long_url: String,
        validity_minutes: Option<i64>,
        custom_code: Option<String>,
    ) -> Result<ShortMapping, AppError> {
        self.create_short_link_at(long_url, validity_minutes, custom_code, Utc::now())
            .await
    }

    /// Creates a short mapping whose validity window starts at `now`.
    ///
    /// See [`Self::create_short_link`] for error cases.
    pub async fn create_short_link_at(
        &self,
        long_url: String,
        validity_minutes: Option<i64>,
        custom_code: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ShortMapping, AppError> {
        validate_target_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let custom_code = custom_code.filter(|c| !c.is_empty());
        if let Some(custom) = &custom_code {
            validate_custom_code(custom)?;
        }

        let template = NewMapping::with_validity(String::new(), long_url, now, validity_minutes)?;

        match custom_code {
            Some(custom) => self.insert_custom(template.with_code(custom)).await,
            None => self.insert_generated(template).await,
        }
    }

    /// Constructs the full short URL from a public prefix and a code.
    pub fn get_short_url(&self, prefix: &str, code: &str) -> String {
        build_short_link(prefix, code)
    }

    /// Inserts an owner-chosen code; any existing mapping with it is a conflict.
    async fn insert_custom(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError> {
        let code = new_mapping.code.clone();

        self.store.insert(new_mapping).await.map_err(|e| match e {
            AppError::Conflict { .. } => AppError::conflict(
                "Custom shortcode already in use",
                json!({ "code": code }),
            ),
            other => other,
        })
    }

    /// Generates a unique code with collision retry.
    ///
    /// Both a positive existence check and a lost insert race consume one attempt.
    async fn insert_generated(&self, template: NewMapping) -> Result<ShortMapping, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if is_reserved_code(&code) || self.store.exists(&code).await? {
                continue;
            }

            match self.store.insert(template.clone().with_code(code)).await {
                Ok(mapping) => return Ok(mapping),
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}
