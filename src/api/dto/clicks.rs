//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ClickEvent;

/// One recorded click as exposed by the stats endpoint.
///
/// Absent attributes serialize as `null` so every click has the same shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub location: Option<String>,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            clicked_at: click.clicked_at,
            referrer: click.referrer,
            ip: click.ip,
            user_agent: click.user_agent,
            location: click.location,
        }
    }
}
