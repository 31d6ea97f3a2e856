//! Database models for signatures.

use crate::types::{SignatureId, UserId};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Database request for creating a new signature
#[derive(Debug, Clone)]
pub struct SignatureCreateDBRequest {
    pub user_id: UserId,
    pub template_data: Map<String, Value>,
}

/// Database response for a signature
#[derive(Debug, Clone)]
pub struct SignatureDBResponse {
    pub id: SignatureId,
    pub user_id: UserId,
    pub template_data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}
