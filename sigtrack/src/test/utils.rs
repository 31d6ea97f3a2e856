//! Test utilities for integration testing
use crate::{
    api::models::users::UserResponse,
    auth::{password, session},
    config::{Config, NativeAuthConfig, PasswordConfig, PoolSettings},
    db::{
        handlers::{Links, Repository, Signatures, Users},
        models::{
            links::{LinkCreateDBRequest, LinkDBResponse},
            signatures::{SignatureCreateDBRequest, SignatureDBResponse},
            users::UserCreateDBRequest,
        },
    },
    types::{SignatureId, UserId},
};
use axum_test::TestServer;
use serde_json::{Map, Value, json};
use sqlx::PgPool;

pub const TEST_PASSWORD: &str = "password123";

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-jwt".to_string()),
        auth: crate::config::AuthConfig {
            native: NativeAuthConfig {
                allow_registration: true,
                // Cheap hashing keeps the suite fast
                password: PasswordConfig {
                    argon2_memory_kib: 1024,
                    argon2_iterations: 1,
                    argon2_parallelism: 1,
                    ..Default::default()
                },
            },
            ..Default::default()
        },
        ..Default::default()
    };
    config.database.pool = PoolSettings {
        max_connections: 2,
        min_connections: 0,
        ..Default::default()
    };
    config
}

/// Full application router (all routes and layers) over the given pool
pub async fn create_test_app(pool: PgPool) -> TestServer {
    create_test_app_with_config(pool, create_test_config()).await
}

pub async fn create_test_app_with_config(pool: PgPool, config: Config) -> TestServer {
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

/// Insert a user whose password is [`TEST_PASSWORD`]
pub async fn create_test_user(pool: &PgPool, email: &str) -> UserResponse {
    let params = create_test_config().auth.native.password.argon2_params();
    let password_hash = password::hash_password(TEST_PASSWORD, params).expect("Failed to hash password");

    let mut conn = pool.acquire().await.expect("Failed to acquire database connection");
    let user = Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            email: email.to_string(),
            password_hash,
        })
        .await
        .expect("Failed to create test user");

    user.into()
}

pub fn session_token(user_id: UserId) -> String {
    session::create_session_token(user_id, &create_test_config()).expect("Failed to create session token")
}

/// Template data with every field the renderers need
pub fn full_template_data() -> Map<String, Value> {
    json!({
        "name": "A",
        "job_title": "Eng",
        "company": "C",
        "phone": "1",
        "website": "w",
        "social_links": {"linkedin": "l", "twitter": "t"}
    })
    .as_object()
    .cloned()
    .expect("template data is an object")
}

pub async fn create_test_signature(pool: &PgPool, user_id: UserId) -> SignatureDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire database connection");
    Signatures::new(&mut conn)
        .create(&SignatureCreateDBRequest {
            user_id,
            template_data: full_template_data(),
        })
        .await
        .expect("Failed to create test signature")
}

pub async fn create_test_link(pool: &PgPool, signature_id: SignatureId, url: &str) -> LinkDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire database connection");
    Links::new(&mut conn)
        .create(&LinkCreateDBRequest {
            signature_id,
            url: url.to_string(),
        })
        .await
        .expect("Failed to create test link")
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
