use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    AppState,
    api::{
        extract::ApiJson,
        models::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    },
    auth::{password, session},
    db::{handlers::Users, models::users::UserCreateDBRequest},
    errors::Error,
    types::abbrev_uuid,
};

fn invalid_credentials() -> Error {
    Error::Unauthenticated {
        message: Some("Invalid credentials".to_string()),
    }
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = crate::api::models::ErrorResponse),
        (status = 500, description = "Insert failed, including an already registered email", body = crate::api::models::ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), Error> {
    let native = &state.config.auth.native;
    if !native.allow_registration {
        return Err(Error::BadRequest {
            message: "User registration is disabled".to_string(),
        });
    }

    let email = request.email.trim();
    if email.is_empty() {
        return Err(Error::BadRequest {
            message: "Email is required".to_string(),
        });
    }

    // Validate password length
    let password_config = &native.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    let password_hash = password::hash_password_blocking(request.password, password_config.argon2_params()).await?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    // A taken email is a unique violation and answers like any other failed insert
    let user = Users::new(&mut pool_conn)
        .create(&UserCreateDBRequest {
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!("Registered user {}", abbrev_uuid(&user.id));
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login with email and password
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input", body = crate::api::models::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::api::models::ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, ApiJson(request): ApiJson<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let user = Users::new(&mut pool_conn).get_user_by_email(request.email.trim()).await?;
    drop(pool_conn);

    // Argon2 runs whether or not the email is known
    let params = state.config.auth.native.password.argon2_params();
    let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
    if !password::verify_login_blocking(request.password, stored_hash, params).await? {
        return Err(invalid_credentials());
    }
    let user = user.ok_or_else(invalid_credentials)?;

    let token = session::create_session_token(user.id, &state.config)?;
    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::verify_session_token;
    use crate::test::utils::{TEST_PASSWORD, create_test_config, create_test_user};
    use axum::routing::post;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use sqlx::PgPool;

    fn server(pool: PgPool, config: crate::config::Config) -> TestServer {
        let state = AppState::builder().db(pool).config(config).build();
        let app = axum::Router::new()
            .route("/register", post(register))
            .route("/login", post(login))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_success(pool: PgPool) {
        let server = server(pool.clone(), create_test_config());

        let response = server
            .post("/register")
            .json(&json!({"email": "a@x.com", "password": "pw"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: RegisterResponse = response.json();
        assert_eq!(body.message, "User registered successfully");

        let stored_hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(body.user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(stored_hash.starts_with("$argon2id$"));
        assert_ne!(stored_hash, "pw");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_duplicate_email(pool: PgPool) {
        let server = server(pool.clone(), create_test_config());
        let request = json!({"email": "dup@x.com", "password": "pw"});

        server.post("/register").json(&request).await.assert_status(StatusCode::CREATED);

        let response = server.post("/register").json(&request).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "Database error occurred"}));

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = 'dup@x.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_invalid_body(pool: PgPool) {
        let server = server(pool, create_test_config());

        let response = server.post("/register").json(&json!({"email": "a@x.com"})).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid request body");

        let response = server.post("/register").json(&json!({"email": "  ", "password": "pw"})).await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_password_bounds(pool: PgPool) {
        let mut config = create_test_config();
        config.auth.native.password.min_length = 8;
        config.auth.native.password.max_length = 16;
        let server = server(pool, config);

        let response = server.post("/register").json(&json!({"email": "a@x.com", "password": "short"})).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"], "Password must be at least 8 characters");

        let response = server
            .post("/register")
            .json(&json!({"email": "a@x.com", "password": "x".repeat(17)}))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_register_disabled(pool: PgPool) {
        let mut config = create_test_config();
        config.auth.native.allow_registration = false;
        let server = server(pool, config);

        let response = server.post("/register").json(&json!({"email": "a@x.com", "password": "pw"})).await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login_issues_token_for_user(pool: PgPool) {
        let user = create_test_user(&pool, "login@x.com").await;
        let server = server(pool, create_test_config());

        let response = server
            .post("/login")
            .json(&json!({"email": "login@x.com", "password": TEST_PASSWORD}))
            .await;

        response.assert_status_ok();
        let body: LoginResponse = response.json();
        let verified = verify_session_token(&body.token, &create_test_config()).unwrap();
        assert_eq!(verified.id, user.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login_failures_are_indistinguishable(pool: PgPool) {
        create_test_user(&pool, "login@x.com").await;
        let server = server(pool, create_test_config());

        let wrong_password = server
            .post("/login")
            .json(&json!({"email": "login@x.com", "password": "nope"}))
            .await;
        let unknown_email = server
            .post("/login")
            .json(&json!({"email": "ghost@x.com", "password": TEST_PASSWORD}))
            .await;

        for response in [wrong_password, unknown_email] {
            response.assert_status_unauthorized();
            let body: Value = response.json();
            assert_eq!(body, json!({"error": "Invalid credentials"}));
        }
    }
}
