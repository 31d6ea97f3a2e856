//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: Body and path extractors with uniform rejections
//!
//! # API Structure
//!
//! Everything lives under `/api`:
//!
//! - **Authentication** (`/register`, `/login`): open to anyone
//! - **Profile** (`/me`)
//! - **Signatures** (`/signature`, `/signatures`, `/signature/{id}/*`): templates and rendering
//! - **Links** (`/links`, `/links/{id}/clicks`)
//! - **Tracking** (`/track`)
//! - **Analytics** (`/analytics`, `/analytics/count`)
//!
//! All but the authentication routes require a bearer session token.
//!
//! # OpenAPI Documentation
//!
//! Every endpoint is annotated with `utoipa`. The rendered docs are served at `/docs` and the raw
//! document at `/openapi.json`.

pub mod extract;
pub mod handlers;
pub mod models;
