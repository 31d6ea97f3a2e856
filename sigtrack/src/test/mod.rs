//! End-to-end tests driving the full router built by [`crate::Application`].

pub mod utils;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;
use utils::{count_rows, create_test_app, create_test_link, create_test_signature, create_test_user, full_template_data, session_token};

/// Register, log in, create a signature with a link, click it twice and read it all back.
#[sqlx::test]
#[test_log::test]
async fn test_e2e_signature_lifecycle(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;

    // Step 1: register and log in
    let response = server
        .post("/api/register")
        .json(&json!({"email": "jane@example.com", "password": "hunter2"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully");

    let response = server
        .post("/api/login")
        .json(&json!({"email": "jane@example.com", "password": "hunter2"}))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    let me: Value = server.get("/api/me").authorization_bearer(&token).await.json();
    assert_eq!(me["email"], "jane@example.com");
    assert_eq!(me["id"], body["user_id"]);

    // Step 2: create a signature
    let response = server
        .post("/api/signature")
        .authorization_bearer(&token)
        .json(&json!({"template_data": full_template_data()}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let signature_id = response.json::<Value>()["signature_id"].as_str().unwrap().to_string();

    let listed: Value = server.get("/api/signatures").authorization_bearer(&token).await.json();
    assert_eq!(listed["signatures"].as_array().unwrap().len(), 1);
    assert_eq!(listed["signatures"][0]["template_data"]["name"], "A");

    let count: Value = server.get("/api/signatures/count").authorization_bearer(&token).await.json();
    assert_eq!(count["count"], 1);

    // Step 3: attach a link and click it twice
    let response = server
        .post("/api/links")
        .authorization_bearer(&token)
        .json(&json!({"signature_id": signature_id, "url": "https://jane.example"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let link_id = response.json::<Value>()["link_id"].as_str().unwrap().to_string();

    for ip in ["203.0.113.7", "198.51.100.1"] {
        let response = server
            .post("/api/track")
            .authorization_bearer(&token)
            .json(&json!({"link_id": link_id, "ip_address": ip}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], "Click tracked successfully");
    }

    // Step 4: analytics and counters
    let analytics: Value = server.get("/api/analytics").authorization_bearer(&token).await.json();
    let entries = analytics["analytics"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["link_id"], link_id.as_str());
    assert_eq!(entries[0]["url"], "https://jane.example");
    assert_eq!(entries[0]["total_clicks"], 2);
    assert!(entries[0]["last_clicked"].is_string());

    let clicks: Value = server.get("/api/analytics/count").authorization_bearer(&token).await.json();
    assert_eq!(clicks["count"], 2);
    let links: Value = server.get("/api/links/count").authorization_bearer(&token).await.json();
    assert_eq!(links["count"], 1);

    let link_clicks: Value = server
        .get(&format!("/api/links/{link_id}/clicks"))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(link_clicks["clicks"].as_array().unwrap().len(), 2);

    // Step 5: rendered output
    let export = server
        .get(&format!("/api/signature/{signature_id}/export"))
        .authorization_bearer(&token)
        .await;
    export.assert_status_ok();
    assert!(export.text().contains("<div"));
    assert!(!export.text().contains("<html"));

    let preview = server
        .get(&format!("/api/signature/{signature_id}/preview?template=modern"))
        .authorization_bearer(&token)
        .await;
    preview.assert_status_ok();
    assert!(preview.text().contains("<html"));

    // Step 6: delete, taking the link with it
    let response = server
        .delete(&format!("/api/signature/{signature_id}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Signature and associated links deleted successfully"
    );

    assert_eq!(count_rows(&pool, "signatures").await, 0);
    assert_eq!(count_rows(&pool, "links").await, 0);
    assert_eq!(count_rows(&pool, "clicks").await, 2);

    server
        .get(&format!("/api/signature/{signature_id}/export"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_foreign_signature_is_invisible(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;
    let owner = create_test_user(&pool, "owner@example.com").await;
    let intruder = create_test_user(&pool, "intruder@example.com").await;
    let signature = create_test_signature(&pool, owner.id).await;
    create_test_link(&pool, signature.id, "https://owner.example").await;

    let token = session_token(intruder.id);
    for path in ["", "/export", "/preview", "/links"] {
        let response = server
            .get(&format!("/api/signature/{}{path}", signature.id))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Signature not found");
    }

    let listed: Value = server.get("/api/signatures").authorization_bearer(&token).await.json();
    assert!(listed["signatures"].as_array().unwrap().is_empty());

    // Deleting someone else's signature changes nothing
    server
        .delete(&format!("/api/signature/{}", signature.id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(count_rows(&pool, "signatures").await, 1);
    assert_eq!(count_rows(&pool, "links").await, 1);
}

#[sqlx::test]
#[test_log::test]
async fn test_link_on_foreign_signature_is_rejected(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;
    let owner = create_test_user(&pool, "owner@example.com").await;
    let intruder = create_test_user(&pool, "intruder@example.com").await;
    let signature = create_test_signature(&pool, owner.id).await;

    let response = server
        .post("/api/links")
        .authorization_bearer(session_token(intruder.id))
        .json(&json!({"signature_id": signature.id, "url": "https://phish.example"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Unauthorized to add links to this signature"
    );
    assert_eq!(count_rows(&pool, "links").await, 0);
}

#[sqlx::test]
#[test_log::test]
async fn test_analytics_includes_unclicked_links(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;
    let user = create_test_user(&pool, "quiet@example.com").await;
    let signature = create_test_signature(&pool, user.id).await;
    create_test_link(&pool, signature.id, "https://quiet.example").await;

    let analytics: Value = server
        .get("/api/analytics")
        .authorization_bearer(session_token(user.id))
        .await
        .json();

    let entries = analytics["analytics"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["total_clicks"], 0);
    assert!(entries[0]["last_clicked"].is_null());
}

#[sqlx::test]
#[test_log::test]
async fn test_protected_routes_require_token(pool: PgPool) {
    let server = create_test_app(pool).await;
    let id = uuid::Uuid::new_v4();

    let gets = [
        "/api/me".to_string(),
        "/api/signatures".to_string(),
        "/api/signatures/count".to_string(),
        format!("/api/signature/{id}"),
        format!("/api/signature/{id}/export"),
        format!("/api/signature/{id}/preview"),
        format!("/api/signature/{id}/links"),
        "/api/links/count".to_string(),
        format!("/api/links/{id}/clicks"),
        "/api/analytics".to_string(),
        "/api/analytics/count".to_string(),
    ];
    for path in &gets {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], "Missing or invalid token", "GET {path}");
    }

    for path in ["/api/signature", "/api/links", "/api/track"] {
        server
            .post(path)
            .json(&json!({}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    server
        .delete(&format!("/api/signature/{id}"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server.get("/api/signatures").authorization_bearer("not-a-jwt").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Invalid token");
}

#[sqlx::test]
#[test_log::test]
async fn test_token_for_deleted_user_cannot_create_rows(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;
    let user = create_test_user(&pool, "ghost@example.com").await;
    let token = session_token(user.id);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = server
        .post("/api/signature")
        .authorization_bearer(&token)
        .json(&json!({"template_data": full_template_data()}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Database error occurred");
    assert_eq!(count_rows(&pool, "signatures").await, 0);
}

#[sqlx::test]
#[test_log::test]
async fn test_duplicate_registration_does_not_reveal_account(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;
    let request = json!({"email": "dup@x.com", "password": "pw"});

    server.post("/api/register").json(&request).await.assert_status(StatusCode::CREATED);

    let response = server.post("/api/register").json(&request).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Database error occurred"}));
    assert!(!body.to_string().contains("dup@x.com"));
    assert_eq!(count_rows(&pool, "users").await, 1);
}
