use axum::{Json, extract::State};

use crate::{
    AppState,
    api::{
        extract::ApiJson,
        models::{MessageResponse, clicks::TrackClickRequest, users::CurrentUser},
    },
    db::{handlers::Clicks, models::clicks::ClickCreateDBRequest},
    errors::Error,
};

/// Record a click on a link
///
/// The IP address is stored exactly as supplied, and the link id is not checked.
#[utoipa::path(
    post,
    path = "/track",
    request_body = TrackClickRequest,
    tag = "tracking",
    responses(
        (status = 200, description = "Click recorded", body = MessageResponse),
        (status = 400, description = "Invalid request body", body = crate::api::models::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn track_click(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    ApiJson(request): ApiJson<TrackClickRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Clicks::new(&mut pool_conn)
        .create(&ClickCreateDBRequest {
            link_id: request.link_id,
            ip_address: request.ip_address,
        })
        .await?;

    Ok(Json(MessageResponse::new("Click tracked successfully")))
}
