//! DTOs for per-code statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::application::services::DetailedStats;

/// Mapping metadata with its full click history, most recent first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub total_clicks: usize,
    pub clicks: Vec<ClickInfo>,
}

impl From<DetailedStats> for StatsResponse {
    fn from(stats: DetailedStats) -> Self {
        Self {
            original_url: stats.mapping.original_url,
            shortcode: stats.mapping.code,
            created_at: stats.mapping.created_at,
            expiry: stats.mapping.expires_at,
            total_clicks: stats.total_clicks,
            clicks: stats.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
