//! In-memory implementation of the mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{ClickEvent, MappingHistory, NewClick, NewMapping, ShortMapping};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// Storage entry: a mapping and its click history, locked together.
#[derive(Debug, Clone)]
struct Entry {
    mapping: ShortMapping,
    clicks: Vec<ClickEvent>,
}

/// In-memory store backed by a sharded concurrent map.
///
/// Insert uses the map's entry API and append mutates the entry under its
/// shard write lock, so both are atomic per code. Entries are never evicted:
/// expired codes stay taken. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryMappingStore {
    storage: DashMap<String, Entry>,
    next_mapping_id: AtomicI64,
    next_click_id: AtomicI64,
}

impl InMemoryMappingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_mapping_id: AtomicI64::new(1),
            next_click_id: AtomicI64::new(1),
        }
    }

    /// Number of codes taken, expired or not.
    pub fn mapping_count(&self) -> usize {
        self.storage.len()
    }
}

impl Default for InMemoryMappingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(code))
    }

    async fn get(&self, code: &str) -> Result<Option<ShortMapping>, AppError> {
        Ok(self.storage.get(code).map(|e| e.mapping.clone()))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError> {
        match self.storage.entry(new_mapping.code.clone()) {
            MapEntry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_mapping.code }),
            )),
            MapEntry::Vacant(slot) => {
                let mapping = ShortMapping::new(
                    self.next_mapping_id.fetch_add(1, Ordering::Relaxed),
                    new_mapping.code,
                    new_mapping.original_url,
                    new_mapping.created_at,
                    new_mapping.expires_at,
                );
                slot.insert(Entry {
                    mapping: mapping.clone(),
                    clicks: Vec::new(),
                });
                Ok(mapping)
            }
        }
    }

    async fn append_click(&self, code: &str, new_click: NewClick) -> Result<ClickEvent, AppError> {
        let mut entry = self
            .storage
            .get_mut(code)
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "code": code })))?;

        let event = new_click.into_event(self.next_click_id.fetch_add(1, Ordering::Relaxed));
        entry.clicks.push(event.clone());

        Ok(event)
    }

    async fn get_all(&self, code: &str) -> Result<Option<MappingHistory>, AppError> {
        Ok(self.storage.get(code).map(|e| MappingHistory {
            mapping: e.mapping.clone(),
            clicks: e.clicks.clone(),
        }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
