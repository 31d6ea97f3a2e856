//! API response models for click analytics.

use crate::db::models::analytics::LinkClickStats;
use crate::types::{LinkId, SignatureId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkAnalyticsEntry {
    #[schema(value_type = String, format = "uuid")]
    pub link_id: LinkId,
    #[schema(value_type = String, format = "uuid")]
    pub signature_id: SignatureId,
    pub url: String,
    pub total_clicks: i64,
    /// Absent when the link has never been clicked
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<LinkClickStats> for LinkAnalyticsEntry {
    fn from(stats: LinkClickStats) -> Self {
        Self {
            link_id: stats.link_id,
            signature_id: stats.signature_id,
            url: stats.url,
            total_clicks: stats.total_clicks,
            last_clicked: stats.last_clicked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub analytics: Vec<LinkAnalyticsEntry>,
}
