use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::{instrument, trace};

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-UTF-8 value or any other scheme is rejected before the token itself is
/// looked at.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Missing or invalid token".to_string()),
        })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        // Already verified by the route guard
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        trace!("No authenticated user in request extensions, verifying bearer token");
        let token = bearer_token(&parts.headers)?;
        session::verify_session_token(token, &state.config)
    }
}
