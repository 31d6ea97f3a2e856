//! API request and response data models.
//!
//! These structures define the public JSON contract. They are kept separate from the database
//! models in [`crate::db::models`] so the storage representation can change independently, and
//! every one derives `utoipa::ToSchema` for the OpenAPI document.
//!
//! - [`auth`]: registration and login payloads
//! - [`users`]: the authenticated caller and their profile
//! - [`signatures`]: signature templates, rendering options and counts
//! - [`links`]: trackable links
//! - [`clicks`]: click tracking
//! - [`analytics`]: per-link click aggregation

pub mod analytics;
pub mod auth;
pub mod clicks;
pub mod links;
pub mod signatures;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A plain `{"count": n}` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

/// A plain `{"message": "..."}` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Dotted path of the missing template field, only for 422 responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
