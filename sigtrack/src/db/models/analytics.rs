//! Database models for click analytics.

use crate::types::{LinkId, SignatureId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Click totals for one link
#[derive(Debug, Clone, FromRow)]
pub struct LinkClickStats {
    pub link_id: LinkId,
    pub signature_id: SignatureId,
    pub url: String,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}
