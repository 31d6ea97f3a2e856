//! # sigtrack: email signature service
//!
//! `sigtrack` stores email-signature templates for registered users, renders them to HTML, and
//! records clicks on the links embedded in them. Everything is exposed as a JSON API under `/api`,
//! protected by bearer session tokens.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses PostgreSQL for all persistence. Requests flow router → authentication guard → handler →
//! repository → database; no state is held in memory between requests apart from the pool.
//!
//! - The **API layer** ([`api`]) holds the route handlers and the request/response models.
//! - The **authentication layer** ([`auth`]) hashes passwords, issues and verifies session
//!   tokens, and guards every route except registration and login.
//! - The **database layer** ([`db`]) wraps each table in a repository. Deleting a signature is the
//!   only multi-statement operation and runs in a transaction.
//! - **Rendering** ([`render`]) validates stored template data and fills the HTML layouts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use sigtrack::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = sigtrack::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     sigtrack::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations are embedded and run on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! sigtrack::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod render;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use crate::{auth::middleware::require_session, config::CorsOrigin, openapi::ApiDoc};
use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{LinkId, SignatureId, UserId};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the sigtrack database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to PostgreSQL with the configured pool settings and apply migrations.
///
/// Any failure here aborts startup.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    let optional = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(optional(settings.idle_timeout_secs))
        .max_lifetime(optional(settings.max_lifetime_secs))
        .connect(&config.database.url)
        .await?;

    migrator().run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry the trailing slash Url adds
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(cors_config.allow_credentials)
        .allow_headers([
            http::header::ORIGIN,
            http::header::CONTENT_TYPE,
            http::header::ACCEPT,
            http::header::AUTHORIZATION,
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router.
///
/// - `/api/register` and `/api/login` are open
/// - every other `/api` route sits behind [`require_session`]
/// - `/healthz`, `/openapi.json` and the `/docs` UI are unauthenticated
/// - CORS and request tracing wrap everything
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use api::handlers::{analytics, auth, clicks, links, signatures, users};

    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/me", get(users::get_current_user))
        .route("/signature", post(signatures::create_signature))
        .route("/signatures", get(signatures::list_signatures))
        .route("/signatures/count", get(signatures::count_signatures))
        .route(
            "/signature/{id}",
            get(signatures::get_signature).delete(signatures::delete_signature),
        )
        .route("/signature/{id}/export", get(signatures::export_signature))
        .route("/signature/{id}/preview", get(signatures::preview_signature))
        .route("/signature/{id}/links", get(signatures::list_signature_links))
        .route("/links", post(links::create_link))
        .route("/links/count", get(links::count_links))
        .route("/links/{id}/clicks", get(links::list_link_clicks))
        .route("/track", post(clicks::track_click))
        .route("/analytics", get(analytics::get_analytics))
        .route("/analytics/count", get(analytics::count_clicks))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let api_routes = public_routes.merge(protected_routes).with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The runnable service: router, configuration and database pool.
///
/// 1. **Create**: [`Application::new`] connects to the database and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests
/// 3. **Shutdown**: once the shutdown future resolves, in-flight requests finish, the pool is
///    closed and pending spans are flushed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application, reusing `pool` if given instead of connecting from the config
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!(host = %config.host, port = config.port, "Starting sigtrack");

        // Parse the signature layouts before accepting requests
        render::environment()?;

        let pool = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "sigtrack listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
