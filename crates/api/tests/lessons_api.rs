//! HTTP-level integration tests for lesson CRUD.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use coachly_llm::ScriptedGateway;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, token};
use serde_json::json;

fn app() -> common::TestApp {
    common::build_test_app(Arc::new(ScriptedGateway::default()))
}

#[tokio::test]
async fn create_lesson_returns_201() {
    let app = app();
    let response = post_json_auth(
        app.router(),
        "/lessons",
        &token("u1", None),
        json!({"topic": "Giving feedback", "lesson": "Be specific."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["topic"], "Giving feedback");
    assert_eq!(json["source"], "manual");
    assert_eq!(json["user_id"], "u1");
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn lesson_crud_round() {
    let app = app();
    let token = token("u1", None);

    let created = body_json(
        post_json_auth(
            app.router(),
            "/lessons",
            &token,
            json!({"topic": "Time", "lesson": "Block your calendar."}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = get_auth(app.router(), &format!("/lessons/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["lesson"], "Block your calendar.");

    let response = put_json_auth(
        app.router(),
        &format!("/lessons/{id}"),
        &token,
        json!({"lesson": "Block focus time every morning."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["topic"], "Time");
    assert_eq!(updated["lesson"], "Block focus time every morning.");

    let response = delete_auth(app.router(), &format!("/lessons/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.router(), &format!("/lessons/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lessons_are_private_to_their_owner() {
    let app = app();
    let created = body_json(
        post_json_auth(
            app.router(),
            "/lessons",
            &token("owner", None),
            json!({"topic": "Mine", "lesson": ""}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let intruder = token("intruder", None);
    let response = get_auth(app.router(), &format!("/lessons/{id}"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.router(), &format!("/lessons/{id}"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = body_json(get_auth(app.router(), "/lessons", &intruder).await).await;
    assert!(listed["lessons"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = app();
    let response = put_json_auth(app.router(), "/lessons/any", &token("u1", None), json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_lesson_returns_404_body() {
    let app = app();
    let response = get_auth(app.router(), "/lessons/nope", &token("u1", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Lesson with id nope not found");
}
