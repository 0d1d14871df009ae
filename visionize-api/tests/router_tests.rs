/// Router-level tests for the API surface
///
/// These exercise the paths that resolve before any query runs: the bearer
/// gate, body validation, and the error envelope. The pool is lazy, so no
/// database is needed; tests that require live data live alongside the model
/// code.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Duration;
use common::{test_app, test_token, TEST_SECRET};
use serde_json::{json, Value};
use tower::ServiceExt as _;
use uuid::Uuid;
use visionize_shared::auth::jwt::{issue_token, Claims};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = auth {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_is_public() {
    for uri in ["/health", "/api/health"] {
        let response = test_app()
            .oneshot(request(Method::GET, uri, None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{} should answer", uri);

        let body = body_json(response).await;
        assert_eq!(body["ok"], json!(true));
        // No database behind the lazy pool, so the probe reports it down.
        assert_eq!(body["db"], json!("disconnected"));
    }
}

#[tokio::test]
async fn test_protected_routes_reject_missing_token() {
    let id = Uuid::new_v4();
    let routes = [
        (Method::GET, "/api/projects".to_string()),
        (Method::POST, "/api/projects".to_string()),
        (Method::GET, format!("/api/projects/{}", id)),
        (Method::PUT, format!("/api/projects/{}", id)),
        (Method::DELETE, format!("/api/projects/{}", id)),
        (Method::POST, format!("/api/projects/{}/members", id)),
        (Method::DELETE, format!("/api/projects/{}/members/a@b.c", id)),
        (Method::GET, format!("/api/projects/{}/tasks", id)),
        (Method::POST, format!("/api/projects/{}/tasks", id)),
        (Method::PUT, format!("/api/tasks/{}", id)),
        (Method::DELETE, format!("/api/tasks/{}", id)),
    ];

    for (method, uri) in routes {
        let response = test_app()
            .oneshot(request(method.clone(), &uri, None, None))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require a token",
            method,
            uri
        );
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let response = test_app()
        .oneshot(request(
            Method::GET,
            "/api/projects",
            Some("not-a-real-token"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_wrongly_signed_token_rejected() {
    let claims = Claims::new(Uuid::new_v4(), "test@example.com");
    let token = issue_token(&claims, "a-different-secret-32-bytes-long!!").unwrap();

    let response = test_app()
        .oneshot(request(Method::GET, "/api/projects", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let claims = Claims::with_ttl(
        Uuid::new_v4(),
        "test@example.com",
        Duration::seconds(-60),
    );
    let token = issue_token(&claims, TEST_SECRET).unwrap();

    let response = test_app()
        .oneshot(request(Method::GET, "/api/projects", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_non_bearer_authorization_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/projects")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_requires_email_and_password() {
    let cases = [
        json!({}),
        json!({ "email": "new@example.com" }),
        json!({ "password": "secret123" }),
    ];

    for body in cases {
        let response = test_app()
            .oneshot(request(Method::POST, "/api/auth/signup", None, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Email and password required" }));
    }
}

#[tokio::test]
async fn test_signup_rejects_bad_email_format() {
    let response = test_app()
        .oneshot(request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": "secret123" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid email format" })
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/signin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_management_method_is_bad_request() {
    // The gate passes (valid token); the body fails enum deserialization
    // before any query runs.
    let token = test_token();
    let response = test_app()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "title": "Apollo", "managementMethod": "Agile" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_task_status_is_bad_request() {
    let token = test_token();
    let response = test_app()
        .oneshot(request(
            Method::PUT,
            &format!("/api/tasks/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({ "title": "t", "status": "Paused" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
