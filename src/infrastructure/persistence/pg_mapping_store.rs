//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, MappingHistory, NewClick, NewMapping, ShortMapping};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<MappingRow> for ShortMapping {
    fn from(r: MappingRow) -> Self {
        ShortMapping::new(r.id, r.code, r.original_url, r.created_at, r.expires_at)
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    clicked_at: DateTime<Utc>,
    referrer: Option<String>,
    ip: Option<String>,
    user_agent: Option<String>,
    location: Option<String>,
}

impl From<ClickRow> for ClickEvent {
    fn from(r: ClickRow) -> Self {
        ClickEvent {
            id: r.id,
            clicked_at: r.clicked_at,
            referrer: r.referrer,
            ip: r.ip,
            user_agent: r.user_agent,
            location: r.location,
        }
    }
}

/// PostgreSQL store for mappings and their clicks.
///
/// Insert-if-absent is a single `INSERT … ON CONFLICT DO NOTHING`, and a click
/// append is a single `INSERT … SELECT` keyed by code, so both are atomic
/// without explicit transactions. Pool acquire timeouts surface as
/// [`AppError::Unavailable`].
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM short_mappings WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn get(&self, code: &str) -> Result<Option<ShortMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, code, original_url, created_at, expires_at
            FROM short_mappings
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortMapping::from))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<ShortMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO short_mappings (code, original_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO NOTHING
            RETURNING id, code, original_url, created_at, expires_at
            "#,
        )
        .bind(&new_mapping.code)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.created_at)
        .bind(new_mapping.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortMapping::from).ok_or_else(|| {
            AppError::conflict(
                "Short code already exists",
                json!({ "code": new_mapping.code }),
            )
        })
    }

    async fn append_click(&self, code: &str, new_click: NewClick) -> Result<ClickEvent, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (mapping_id, clicked_at, referrer, ip, user_agent, location)
            SELECT m.id, $2, $3, $4, $5, $6
            FROM short_mappings m
            WHERE m.code = $1
            RETURNING id, clicked_at, referrer, ip, user_agent, location
            "#,
        )
        .bind(code)
        .bind(new_click.clicked_at)
        .bind(new_click.referrer)
        .bind(new_click.ip)
        .bind(new_click.user_agent)
        .bind(new_click.location)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ClickEvent::from)
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "code": code })))
    }

    async fn get_all(&self, code: &str) -> Result<Option<MappingHistory>, AppError> {
        let Some(mapping) = self.get(code).await? else {
            return Ok(None);
        };

        let clicks = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, clicked_at, referrer, ip, user_agent, location
            FROM clicks
            WHERE mapping_id = $1
            ORDER BY clicked_at DESC, id DESC
            "#,
        )
        .bind(mapping.id)
        .fetch_all(self.pool.as_ref())
        .await?
        .into_iter()
        .map(ClickEvent::from)
        .collect();

        Ok(Some(MappingHistory { mapping, clicks }))
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
