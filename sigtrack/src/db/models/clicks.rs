//! Database models for clicks.

use crate::types::{ClickId, LinkId};
use chrono::{DateTime, Utc};

/// Database request for recording a click
#[derive(Debug, Clone)]
pub struct ClickCreateDBRequest {
    pub link_id: LinkId,
    /// As reported by the caller, not taken from the connection
    pub ip_address: String,
}

/// Database response for a click
#[derive(Debug, Clone)]
pub struct ClickDBResponse {
    pub id: ClickId,
    pub link_id: LinkId,
    pub ip_address: String,
    pub timestamp: DateTime<Utc>,
}
