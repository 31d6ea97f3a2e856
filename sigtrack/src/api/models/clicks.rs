//! API request/response models for click tracking.

use crate::db::models::clicks::ClickDBResponse;
use crate::types::{ClickId, LinkId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackClickRequest {
    #[schema(value_type = String, format = "uuid")]
    pub link_id: LinkId,
    /// Recorded as given
    pub ip_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClickResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ClickId,
    #[schema(value_type = String, format = "uuid")]
    pub link_id: LinkId,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ClickDBResponse> for ClickResponse {
    fn from(db: ClickDBResponse) -> Self {
        Self {
            id: db.id,
            link_id: db.link_id,
            ip_address: db.ip_address,
            timestamp: db.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClickListResponse {
    pub clicks: Vec<ClickResponse>,
}
