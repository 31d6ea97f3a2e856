//! OpenAPI documentation for the `/api` surface.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Bearer session token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token returned by `POST /api/login`. Include it in the `Authorization` header:\n\n\
                            ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api", description = "Signature API server")
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::users::get_current_user,
        api::handlers::signatures::create_signature,
        api::handlers::signatures::list_signatures,
        api::handlers::signatures::count_signatures,
        api::handlers::signatures::get_signature,
        api::handlers::signatures::export_signature,
        api::handlers::signatures::preview_signature,
        api::handlers::signatures::delete_signature,
        api::handlers::signatures::list_signature_links,
        api::handlers::links::create_link,
        api::handlers::links::count_links,
        api::handlers::links::list_link_clicks,
        api::handlers::clicks::track_click,
        api::handlers::analytics::get_analytics,
        api::handlers::analytics::count_clicks,
    ),
    components(
        schemas(
            api::models::CountResponse,
            api::models::MessageResponse,
            api::models::ErrorResponse,
            api::models::auth::RegisterRequest,
            api::models::auth::RegisterResponse,
            api::models::auth::LoginRequest,
            api::models::auth::LoginResponse,
            api::models::users::UserResponse,
            api::models::signatures::SignatureCreate,
            api::models::signatures::SignatureCreateResponse,
            api::models::signatures::SignatureResponse,
            api::models::signatures::SignatureListResponse,
            api::models::links::LinkCreate,
            api::models::links::LinkCreateResponse,
            api::models::links::LinkResponse,
            api::models::links::LinkListResponse,
            api::models::clicks::TrackClickRequest,
            api::models::clicks::ClickResponse,
            api::models::clicks::ClickListResponse,
            api::models::analytics::LinkAnalyticsEntry,
            api::models::analytics::AnalyticsResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Register an account and exchange credentials for a session token."),
        (name = "users", description = "The authenticated caller."),
        (name = "signatures", description = "Store signature templates and render them as HTML.

Rendering needs `name`, `job_title`, `company`, `phone`, `website` and `social_links.linkedin` / `social_links.twitter` \
in the template data. A missing field is reported with status 422 and its path in `field`."),
        (name = "links", description = "Trackable links attached to a signature."),
        (name = "tracking", description = "Record clicks on links."),
        (name = "analytics", description = "Click totals per link."),
    ),
    info(
        title = "Signature API",
        version = "1.0.0",
        description = "Email signature templates, trackable links and click analytics.

## Authentication
Every endpoint except `/register` and `/login` needs a session token in the `Authorization` header:
```
Authorization: Bearer YOUR_TOKEN
```

## Errors
Errors are JSON objects with an `error` message:
```json
{ \"error\": \"Signature not found\" }
```",
    ),
)]
pub struct ApiDoc;
