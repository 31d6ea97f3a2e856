//! Request extractors with the API's own rejection bodies.

use crate::errors::Error;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use tracing::debug;
use uuid::Uuid;

/// JSON request body. Every rejection (bad syntax, missing or mistyped field, wrong content type)
/// becomes a 400 `{"error": "Invalid request body"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(Error::BadRequest {
                    message: "Invalid request body".to_string(),
                })
            }
        }
    }
}

/// Parse a path segment as a resource id. Anything that is not a UUID cannot name an existing
/// resource, so it is reported as not found.
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound {
        resource: resource.to_string(),
        id: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Deserialize)]
    struct Body {
        email: String,
    }

    async fn echo(ApiJson(body): ApiJson<Body>) -> String {
        body.email
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/echo", post(echo))).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let response = server().post("/echo").json(&json!({"email": "a@x.com"})).await;
        response.assert_status_ok();
        response.assert_text("a@x.com");
    }

    #[tokio::test]
    async fn test_rejections_are_uniform() {
        let server = server();

        let missing_field = server.post("/echo").json(&json!({"other": 1})).await;
        let wrong_type = server.post("/echo").json(&json!({"email": 7})).await;
        let not_json = server.post("/echo").text("email=a@x.com").await;

        for response in [missing_field, wrong_type, not_json] {
            response.assert_status_bad_request();
            let body: Value = response.json();
            assert_eq!(body, json!({"error": "Invalid request body"}));
        }
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Signature").unwrap(), id);
        assert!(matches!(parse_id("42", "Signature"), Err(Error::NotFound { .. })));
    }
}
