use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::users::{CurrentUser, UserResponse},
    db::handlers::Users,
    errors::Error,
};

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_current_user(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let user = Users::new(&mut pool_conn)
        .get_by_id(current_user.id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "User".to_string(),
            id: current_user.id.to_string(),
        })?;

    Ok(Json(user.into()))
}
