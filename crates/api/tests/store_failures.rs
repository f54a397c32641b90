//! Integration tests for responses when the document store is down.
//!
//! Secondary writes are logged and dropped, so generation endpoints still
//! answer with the model's text. Primary reads and writes fail with 500.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use coachly_llm::ScriptedGateway;
use common::{body_json, get_auth, post_json_auth, token};
use serde_json::json;

#[tokio::test]
async fn micro_lesson_is_returned_when_saving_it_fails() {
    let gateway = Arc::new(ScriptedGateway::new(["Pause before you answer."]));
    let (router, _voice_root) = common::build_failing_store_app(gateway);

    let response = post_json_auth(
        router,
        "/micro-lesson",
        &token("u1", None),
        json!({"topic": "difficult conversations"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"micro_lesson": "Pause before you answer."})
    );
}

#[tokio::test]
async fn simulation_step_is_returned_when_session_log_fails() {
    let step = json!({"customerText": "That works for me.", "choices": ["Great"]});
    let gateway = Arc::new(ScriptedGateway::new([step.to_string()]));
    let (router, _voice_root) = common::build_failing_store_app(gateway);

    let response = post_json_auth(
        router,
        "/simulation-step",
        &token("u1", None),
        json!({"history": [], "user_input": "I can offer a discount"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, step);
}

#[tokio::test]
async fn unrouted_prompt_is_answered_when_idea_log_fails() {
    let classification = json!({
        "intent": "order lunch",
        "module_match": null,
        "new_feature": "catering",
        "confidence": "Low",
        "follow_up_question": "For how many people?",
    });
    let gateway = Arc::new(ScriptedGateway::new([classification.to_string()]));
    let (router, _voice_root) = common::build_failing_store_app(gateway);

    let response = post_json_auth(
        router,
        "/route",
        &token("u1", None),
        json!({"prompt": "Order lunch for the team"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["module"].is_null());
    assert_eq!(json["classification"]["intent"], "order lunch");
    assert_eq!(json["classification"]["follow_up_question"], "For how many people?");
}

#[tokio::test]
async fn certification_recommendations_survive_both_failed_writes() {
    let gateway = Arc::new(ScriptedGateway::new(["1. CKA"]));
    let (router, _voice_root) = common::build_failing_store_app(gateway);

    let response = post_json_auth(
        router,
        "/certifications/recommend",
        &token("u1", None),
        json!({"role": "Platform engineer", "skills": ["kubernetes"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"recommendations": "1. CKA"}));
}

#[tokio::test]
async fn listing_lessons_fails_with_sanitized_500() {
    let (router, _voice_root) = common::build_failing_store_app(Arc::new(ScriptedGateway::default()));

    let response = get_auth(router, "/lessons", &token("u1", None)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("store unavailable"));
}
