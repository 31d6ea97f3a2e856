use crate::{AppState, api::models::users::CurrentUser, errors::Error, types::abbrev_uuid};
use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::trace;

/// Authenticate the request and stash the caller in the request extensions.
///
/// Returns the request unchanged apart from the added [`CurrentUser`].
pub(crate) async fn authenticate(state: &AppState, request: Request) -> Result<Request, Error> {
    let (mut parts, body) = request.into_parts();
    let current_user = CurrentUser::from_request_parts(&mut parts, state).await?;
    trace!("Authenticated user: {}", abbrev_uuid(&current_user.id));

    parts.extensions.insert(current_user);
    Ok(Request::from_parts(parts, body))
}

/// Route guard for every protected `/api` route. Rejected requests never reach the handler.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, Error> {
    let request = authenticate(&state, request).await?;
    Ok(next.run(request).await)
}
