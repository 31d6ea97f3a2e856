use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        CountResponse,
        analytics::{AnalyticsResponse, LinkAnalyticsEntry},
        users::CurrentUser,
    },
    db::handlers::{Analytics, Clicks},
    errors::Error,
};

/// Click totals for every link on the caller's signatures
///
/// Links that were never clicked are listed with a total of zero.
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "analytics",
    responses(
        (status = 200, description = "Per-link click statistics", body = AnalyticsResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_analytics(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<AnalyticsResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let stats = Analytics::new(&mut pool_conn).link_stats_for_user(current_user.id).await?;

    Ok(Json(AnalyticsResponse {
        analytics: stats.into_iter().map(LinkAnalyticsEntry::from).collect(),
    }))
}

/// Total number of recorded clicks across all users
#[utoipa::path(
    get,
    path = "/analytics/count",
    tag = "analytics",
    responses(
        (status = 200, description = "Number of clicks", body = CountResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn count_clicks(State(state): State<AppState>, _current_user: CurrentUser) -> Result<Json<CountResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let count = Clicks::new(&mut pool_conn).count_all().await?;

    Ok(Json(CountResponse { count }))
}
