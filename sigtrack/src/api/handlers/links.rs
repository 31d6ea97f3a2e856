use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        extract::{ApiJson, parse_id},
        models::{
            CountResponse,
            clicks::{ClickListResponse, ClickResponse},
            links::{LinkCreate, LinkCreateResponse},
            users::CurrentUser,
        },
    },
    db::{
        handlers::{Clicks, Links, Repository, Signatures},
        models::links::LinkCreateDBRequest,
    },
    errors::Error,
};

/// Add a trackable link to one of the caller's signatures
#[utoipa::path(
    post,
    path = "/links",
    request_body = LinkCreate,
    tag = "links",
    responses(
        (status = 201, description = "Link created", body = LinkCreateResponse),
        (status = 400, description = "Invalid request body", body = crate::api::models::ErrorResponse),
        (status = 401, description = "Missing token, or the signature is not the caller's", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_link(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ApiJson(request): ApiJson<LinkCreate>,
) -> Result<(StatusCode, Json<LinkCreateResponse>), Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if !Signatures::new(&mut pool_conn)
        .is_owned_by(request.signature_id, current_user.id)
        .await?
    {
        return Err(Error::NotOwner {
            action: "add links to".to_string(),
            resource: "this signature".to_string(),
        });
    }

    let link = Links::new(&mut pool_conn)
        .create(&LinkCreateDBRequest {
            signature_id: request.signature_id,
            url: request.url,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkCreateResponse {
            message: "Link created successfully".to_string(),
            link_id: link.id,
        }),
    ))
}

/// Total number of links across all users
#[utoipa::path(
    get,
    path = "/links/count",
    tag = "links",
    responses(
        (status = 200, description = "Number of links", body = CountResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn count_links(State(state): State<AppState>, _current_user: CurrentUser) -> Result<Json<CountResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let count = Links::new(&mut pool_conn).count_all().await?;

    Ok(Json(CountResponse { count }))
}

/// List the clicks recorded for a link on one of the caller's signatures
#[utoipa::path(
    get,
    path = "/links/{id}/clicks",
    tag = "links",
    params(("id" = String, Path, description = "Link ID")),
    responses(
        (status = 200, description = "Clicks, newest first", body = ClickListResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Link not found", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_link_clicks(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ClickListResponse>, Error> {
    let id = parse_id(&id, "Link")?;
    let not_found = || Error::NotFound {
        resource: "Link".to_string(),
        id: id.to_string(),
    };
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let link = Links::new(&mut pool_conn).get_by_id(id).await?.ok_or_else(not_found)?;
    if !Signatures::new(&mut pool_conn)
        .is_owned_by(link.signature_id, current_user.id)
        .await?
    {
        return Err(not_found());
    }

    let clicks = Clicks::new(&mut pool_conn).list_for_link(id).await?;
    Ok(Json(ClickListResponse {
        clicks: clicks.into_iter().map(ClickResponse::from).collect(),
    }))
}
