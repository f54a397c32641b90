//! Integration tests for the generator endpoints and the raw model routes.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use coachly_core::outcome::Outcome;
use coachly_llm::{CompletionRequest, ModelGateway, PromptInput, ScriptedGateway};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use common::{body_json, body_text, get_auth, post_json_auth, token};
use serde_json::json;

#[tokio::test]
async fn simulation_step_falls_back_on_non_json() {
    let gateway = Arc::new(ScriptedGateway::new(["not json"]));
    let app = common::build_test_app(gateway.clone());
    let response = post_json_auth(
        app.router(),
        "/simulation-step",
        &token("u1", None),
        json!({"history": [], "user_input": "I want a refund"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({"customerText": "Sorry, could not parse AI response.", "choices": []})
    );

    let requests = gateway.requests();
    let Some(PromptInput::Text(prompt)) = &requests[0].input else {
        panic!("expected a text prompt");
    };
    assert!(prompt.ends_with("Employee's next response: I want a refund\nContinue the scenario."));
}

#[tokio::test]
async fn simulation_step_returns_parsed_step() {
    let step = json!({"customerText": "Fine, a refund it is.", "choices": ["Thank you"]});
    let gateway = Arc::new(ScriptedGateway::new([step.to_string()]));
    let app = common::build_test_app(gateway);
    let response = post_json_auth(
        app.router(),
        "/simulation-step",
        &token("u1", None),
        json!({
            "history": [{"speaker": "customer", "text": "My order is late", "user_choice": "Sorry"}],
            "user_input": "I can refund it",
        }),
    )
    .await;

    assert_eq!(body_json(response).await, step);
}

#[tokio::test]
async fn micro_lesson_is_saved_to_lessons() {
    let gateway = Arc::new(ScriptedGateway::new(["Listen first, then paraphrase."]));
    let app = common::build_test_app(gateway);
    let token = token("u1", None);

    let response = post_json_auth(
        app.router(),
        "/micro-lesson",
        &token,
        json!({"topic": "active listening"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["micro_lesson"],
        "Listen first, then paraphrase."
    );

    let lessons = body_json(get_auth(app.router(), "/lessons", &token).await).await;
    let lessons = lessons["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["topic"], "active listening");
    assert_eq!(lessons[0]["source"], "generated");
}

#[tokio::test]
async fn micro_lesson_without_topic_is_a_200_error() {
    let gateway = Arc::new(ScriptedGateway::default());
    let app = common::build_test_app(gateway.clone());
    let token = token("u1", None);

    for body in [json!({}), json!({"topic": "   "})] {
        let response = post_json_auth(app.router(), "/micro-lesson", &token, body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"error": "No topic provided"}));
    }
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn overlong_topic_is_still_a_validation_error() {
    let app = common::build_test_app(Arc::new(ScriptedGateway::default()));
    let response = post_json_auth(
        app.router(),
        "/micro-lesson",
        &token("u1", None),
        json!({"topic": "x".repeat(201)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn prompt_endpoints_report_their_missing_field() {
    let app = common::build_test_app(Arc::new(ScriptedGateway::default()));
    let token = token("u1", None);

    for (uri, field) in [
        ("/recommendation", "skill_gap"),
        ("/video-quiz", "summary"),
        ("/certifications/recommend", "role"),
        ("/certifications/study-plan", "certification_name"),
        ("/certifications/simulate", "certification_name"),
        ("/certifications/career-coach", "role"),
    ] {
        let response = post_json_auth(app.router(), uri, &token, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({"error": format!("No {field} provided")}),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn web_search_without_query_is_a_200_error() {
    let app = common::build_test_app(Arc::new(ScriptedGateway::default()));
    let response = post_json_auth(app.router(), "/web-search", &token("u1", None), json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"error": "No query provided"}));
}

#[tokio::test]
async fn video_quiz_returns_parsed_items() {
    let quiz = json!([{"question": "What is SMART?", "options": ["A", "B"], "answer": "A"}]);
    let app = common::build_test_app(Arc::new(ScriptedGateway::new([quiz.to_string()])));
    let response = post_json_auth(
        app.router(),
        "/video-quiz",
        &token("u1", None),
        json!({"summary": "A talk on goal setting"}),
    )
    .await;

    assert_eq!(body_json(response).await["quiz"], quiz);
}

#[tokio::test]
async fn career_coach_sends_history_as_messages() {
    let gateway = Arc::new(ScriptedGateway::new(["Have you asked your manager?"]));
    let app = common::build_test_app(gateway.clone());
    let response = post_json_auth(
        app.router(),
        "/career-coach",
        &token("u1", None),
        json!({"history": [{"speaker": "user", "text": "How do I get promoted?"}]}),
    )
    .await;

    assert_eq!(
        body_json(response).await["reply"],
        "Have you asked your manager?"
    );
    assert!(matches!(
        gateway.requests()[0].input,
        Some(PromptInput::Messages(_))
    ));
}

#[tokio::test]
async fn llm_without_script_returns_mock() {
    let app = common::build_test_app(Arc::new(ScriptedGateway::default()));
    let response = post_json_auth(
        app.router(),
        "/llm",
        &token("u1", None),
        json!({"prompt": "Explain X"}),
    )
    .await;

    let text = body_json(response).await["response"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(text.starts_with("[MOCKED RESPONSE]"));
    assert!(text.contains("Explain X"));
}

#[tokio::test]
async fn llm_stream_body_is_the_concatenated_chunks() {
    let app = common::build_test_app(Arc::new(ScriptedGateway::new(["one two three"])));
    let response = post_json_auth(
        app.router(),
        "/llm-stream",
        &token("u1", None),
        json!({"prompt": "count"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(body_text(response).await, "one two three");
}

/// Streams one chunk and then never finishes.
struct StalledGateway;

#[async_trait]
impl ModelGateway for StalledGateway {
    async fn complete(&self, _request: CompletionRequest) -> Outcome<String> {
        Outcome::Ok("unused".into())
    }

    async fn complete_stream(&self, _request: CompletionRequest) -> BoxStream<'static, String> {
        stream::iter(vec!["partial ".to_string()])
            .chain(stream::pending())
            .boxed()
    }
}

#[tokio::test]
async fn llm_stream_body_is_closed_at_the_stream_deadline() {
    let app = common::build_test_app_with(Arc::new(StalledGateway), |config| {
        config.stream_timeout_secs = 1;
    });
    let response = post_json_auth(
        app.router(),
        "/llm-stream",
        &token("u1", None),
        json!({"prompt": "never ends"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = tokio::time::timeout(std::time::Duration::from_secs(10), body_text(response))
        .await
        .expect("stream body was not closed");
    assert_eq!(body, "partial ");
}
