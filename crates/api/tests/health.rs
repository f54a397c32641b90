//! Integration tests for the public endpoints, authentication and general
//! HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use coachly_llm::ScriptedGateway;
use common::{body_json, get, get_auth, post_json};
use tower::ServiceExt;

fn app() -> common::TestApp {
    common::build_test_app(Arc::new(ScriptedGateway::default()))
}

// ---------------------------------------------------------------------------
// Public routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_running_message() {
    let app = app();
    let response = get(app.router(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "AI Workplace Learning API is running.");
}

#[tokio::test]
async fn health_check_reports_store() {
    let app = app();
    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn concepts_needs_no_token() {
    let app = app();
    let response = get(app.router(), "/concepts").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["concepts"]
        .as_str()
        .unwrap()
        .starts_with("[MOCKED RESPONSE]"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = app();
    let response = get(app.router(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = app();
    let response = get(app.router(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/lessons")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "DELETE")
        .header("Access-Control-Request-Headers", "authorization")
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_route_without_token_returns_401() {
    let app = app();
    let response = post_json(
        app.router(),
        "/micro-lesson",
        serde_json::json!({"topic": "feedback"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = app();
    let response = get_auth(app.router(), "/lessons", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn token_signed_with_other_secret_returns_401() {
    let app = app();
    let forged = coachly_api::auth::jwt::issue_token("u1", None, "some-other-secret", 3600).unwrap();
    let response = get_auth(app.router(), "/lessons", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
