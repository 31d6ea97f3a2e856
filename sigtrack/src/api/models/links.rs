//! API request/response models for links.

use crate::db::models::links::LinkDBResponse;
use crate::types::{LinkId, SignatureId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkCreate {
    #[schema(value_type = String, format = "uuid")]
    pub signature_id: SignatureId,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkCreateResponse {
    pub message: String,
    #[schema(value_type = String, format = "uuid")]
    pub link_id: LinkId,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: LinkId,
    #[schema(value_type = String, format = "uuid")]
    pub signature_id: SignatureId,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<LinkDBResponse> for LinkResponse {
    fn from(db: LinkDBResponse) -> Self {
        Self {
            id: db.id,
            signature_id: db.signature_id,
            url: db.url,
            created_at: db.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}
