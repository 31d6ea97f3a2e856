//! Database models for links.

use crate::types::{LinkId, SignatureId};
use chrono::{DateTime, Utc};

/// Database request for creating a new link
#[derive(Debug, Clone)]
pub struct LinkCreateDBRequest {
    pub signature_id: SignatureId,
    pub url: String,
}

/// Database response for a link
#[derive(Debug, Clone)]
pub struct LinkDBResponse {
    pub id: LinkId,
    pub signature_id: SignatureId,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
