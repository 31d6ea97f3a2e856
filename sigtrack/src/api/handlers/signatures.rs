use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use tracing::info;

use crate::{
    AppState,
    api::{
        extract::{ApiJson, parse_id},
        models::{
            CountResponse, MessageResponse,
            links::{LinkListResponse, LinkResponse},
            signatures::{RenderQuery, SignatureCreate, SignatureCreateResponse, SignatureListResponse, SignatureResponse},
            users::CurrentUser,
        },
    },
    db::{
        handlers::{Links, Repository, Signatures, links::LinkFilter, signatures::SignatureFilter},
        models::signatures::{SignatureCreateDBRequest, SignatureDBResponse},
    },
    errors::Error,
    render::{self, SignatureFields, TemplateKind},
    types::{SignatureId, UserId, abbrev_uuid},
};

fn signature_not_found(id: impl ToString) -> Error {
    Error::NotFound {
        resource: "Signature".to_string(),
        id: id.to_string(),
    }
}

/// Look up a signature the caller owns. Foreign and unknown ids are both "not found".
async fn fetch_owned(state: &AppState, id: SignatureId, user_id: UserId) -> Result<SignatureDBResponse, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    Signatures::new(&mut pool_conn)
        .get_owned(id, user_id)
        .await?
        .ok_or_else(|| signature_not_found(id))
}

async fn fields_for(state: &AppState, raw_id: &str, user_id: UserId) -> Result<SignatureFields, Error> {
    let id = parse_id(raw_id, "Signature")?;
    let signature = fetch_owned(state, id, user_id).await?;
    SignatureFields::from_template_data(&signature.template_data)
}

/// Create a signature owned by the caller
#[utoipa::path(
    post,
    path = "/signature",
    request_body = SignatureCreate,
    tag = "signatures",
    responses(
        (status = 201, description = "Signature created", body = SignatureCreateResponse),
        (status = 400, description = "Invalid request body", body = crate::api::models::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_signature(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ApiJson(request): ApiJson<SignatureCreate>,
) -> Result<(StatusCode, Json<SignatureCreateResponse>), Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let signature = Signatures::new(&mut pool_conn)
        .create(&SignatureCreateDBRequest {
            user_id: current_user.id,
            template_data: request.template_data,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignatureCreateResponse {
            message: "Signature created successfully".to_string(),
            signature_id: signature.id,
        }),
    ))
}

/// List the caller's signatures, oldest first
#[utoipa::path(
    get,
    path = "/signatures",
    tag = "signatures",
    responses(
        (status = 200, description = "Signatures owned by the caller", body = SignatureListResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_signatures(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<SignatureListResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let signatures = Signatures::new(&mut pool_conn)
        .list(&SignatureFilter::for_user(current_user.id))
        .await?;

    Ok(Json(SignatureListResponse {
        signatures: signatures.into_iter().map(SignatureResponse::from).collect(),
    }))
}

/// Count the caller's signatures
#[utoipa::path(
    get,
    path = "/signatures/count",
    tag = "signatures",
    responses(
        (status = 200, description = "Number of signatures owned by the caller", body = CountResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn count_signatures(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<CountResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let count = Signatures::new(&mut pool_conn).count_for_user(current_user.id).await?;

    Ok(Json(CountResponse { count }))
}

/// Get one of the caller's signatures
#[utoipa::path(
    get,
    path = "/signature/{id}",
    tag = "signatures",
    params(("id" = String, Path, description = "Signature ID")),
    responses(
        (status = 200, description = "Signature", body = SignatureResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Signature not found", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_signature(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<SignatureResponse>, Error> {
    let id = parse_id(&id, "Signature")?;
    let signature = fetch_owned(&state, id, current_user.id).await?;

    Ok(Json(signature.into()))
}

/// Render a signature as an HTML fragment
#[utoipa::path(
    get,
    path = "/signature/{id}/export",
    tag = "signatures",
    params(("id" = String, Path, description = "Signature ID"), RenderQuery),
    responses(
        (status = 200, description = "Signature HTML fragment", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Signature not found", body = crate::api::models::ErrorResponse),
        (status = 422, description = "Template data lacks a required field", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn export_signature(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, Error> {
    let fields = fields_for(&state, &id, current_user.id).await?;
    let kind = TemplateKind::from_query(query.template.as_deref());

    Ok(Html(render::render_fragment(&fields, kind)?))
}

/// Render a signature inside a standalone preview page
#[utoipa::path(
    get,
    path = "/signature/{id}/preview",
    tag = "signatures",
    params(("id" = String, Path, description = "Signature ID"), RenderQuery),
    responses(
        (status = 200, description = "HTML preview page", body = String, content_type = "text/html"),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Signature not found", body = crate::api::models::ErrorResponse),
        (status = 422, description = "Template data lacks a required field", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn preview_signature(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, Error> {
    let fields = fields_for(&state, &id, current_user.id).await?;
    let kind = TemplateKind::from_query(query.template.as_deref());

    Ok(Html(render::render_preview(&fields, kind)?))
}

/// Delete a signature and all of its links
///
/// Clicks recorded against those links are kept.
#[utoipa::path(
    delete,
    path = "/signature/{id}",
    tag = "signatures",
    params(("id" = String, Path, description = "Signature ID")),
    responses(
        (status = 200, description = "Signature and links deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Signature not found", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_signature(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, Error> {
    let id = parse_id(&id, "Signature")?;
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if !Signatures::new(&mut pool_conn).delete_owned(id, current_user.id).await? {
        return Err(signature_not_found(id));
    }

    info!("Deleted signature {}", abbrev_uuid(&id));
    Ok(Json(MessageResponse::new("Signature and associated links deleted successfully")))
}

/// List the links attached to one of the caller's signatures
#[utoipa::path(
    get,
    path = "/signature/{id}/links",
    tag = "signatures",
    params(("id" = String, Path, description = "Signature ID")),
    responses(
        (status = 200, description = "Links of the signature", body = LinkListResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::models::ErrorResponse),
        (status = 404, description = "Signature not found", body = crate::api::models::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_signature_links(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<LinkListResponse>, Error> {
    let id = parse_id(&id, "Signature")?;
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if !Signatures::new(&mut pool_conn).is_owned_by(id, current_user.id).await? {
        return Err(signature_not_found(id));
    }

    let links = Links::new(&mut pool_conn).list(&LinkFilter::for_signature(id)).await?;
    Ok(Json(LinkListResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}
