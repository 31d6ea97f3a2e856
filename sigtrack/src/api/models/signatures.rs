//! API request/response models for signatures.

use crate::db::models::signatures::SignatureDBResponse;
use crate::types::{SignatureId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureCreate {
    /// Free-form field set; rendering needs `name`, `job_title`, `company`, `phone`, `website`
    /// and `social_links.{linkedin,twitter}`
    #[schema(value_type = Object)]
    pub template_data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureCreateResponse {
    pub message: String,
    #[schema(value_type = String, format = "uuid")]
    pub signature_id: SignatureId,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: SignatureId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = Object)]
    pub template_data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl From<SignatureDBResponse> for SignatureResponse {
    fn from(db: SignatureDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            template_data: db.template_data,
            created_at: db.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureListResponse {
    pub signatures: Vec<SignatureResponse>,
}

/// Query parameters for export and preview
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RenderQuery {
    /// `basic` (default) or `modern`; unknown values fall back to `basic`
    pub template: Option<String>,
}
