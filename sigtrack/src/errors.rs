use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided, or the token was rejected
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Authenticated, but the caller does not own the target resource
    #[error("Caller may not {action} {resource}")]
    NotOwner { action: String, resource: String },

    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found (or not visible to the caller)
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Stored template data lacks a field required for rendering
    #[error("Signature is missing required field '{field}'")]
    MissingTemplateField { field: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } | Error::NotOwner { .. } => StatusCode::UNAUTHORIZED,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::MissingTemplateField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            // Constraint violations are persistence failures; naming the constraint would reveal
            // which rows exist (e.g. a registered email)
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. }
                | DbError::ForeignKeyViolation { .. }
                | DbError::CheckViolation { .. }
                | DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::NotOwner { action, resource } => format!("Unauthorized to {action} {resource}"),
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, .. } => format!("{resource} not found"),
            Error::MissingTemplateField { field } => format!("Signature is missing required field '{field}'"),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(DbError::NotFound) => "Resource not found".to_string(),
            Error::Database(_) => "Database error occurred".to_string(),
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::NotFound) => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Database(db_err) => {
                tracing::warn!(error = ?db_err, "Database constraint error");
            }
            Error::Unauthenticated { .. } | Error::NotOwner { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } | Error::MissingTemplateField { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = match &self {
            Error::MissingTemplateField { field } => json!({
                "error": self.user_message(),
                "field": field,
            }),
            _ => json!({ "error": self.user_message() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert from String errors (e.g., from external functions)
impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal { operation: msg }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
