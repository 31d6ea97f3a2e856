//! JWT session token creation and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{api::models::users::CurrentUser, config::Config, errors::Error, types::UserId};

/// JWT session claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl SessionClaims {
    /// Create new session claims for a user
    pub fn new(user_id: UserId, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.security.jwt_expiry;

        Self {
            user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<SessionClaims> for CurrentUser {
    fn from(claims: SessionClaims) -> Self {
        Self { id: claims.user_id }
    }
}

fn secret_key(config: &Config) -> Result<&str, Error> {
    config.secret_key.as_deref().ok_or_else(|| Error::Internal {
        operation: "JWT sessions: secret_key is required".to_string(),
    })
}

/// Create a JWT token for a user session
pub fn create_session_token(user_id: UserId, config: &Config) -> Result<String, Error> {
    let claims = SessionClaims::new(user_id, config);
    let key = EncodingKey::from_secret(secret_key(config)?.as_bytes());

    encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token. Only HS256 is accepted.
pub fn verify_session_token(token: &str, config: &Config) -> Result<CurrentUser, Error> {
    let key = DecodingKey::from_secret(secret_key(config)?.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let invalid = || Error::Unauthenticated {
        message: Some("Invalid token".to_string()),
    };

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => invalid(),

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        _ => invalid(),
    })?;

    Ok(CurrentUser::from(token_data.claims))
}
