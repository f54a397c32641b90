#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use tower::ServiceExt;

use coachly_api::auth::jwt::{issue_token, SharedSecretVerifier};
use coachly_api::config::{IdentityConfig, ServerConfig, VoiceConfig};
use coachly_api::router::build_app_router;
use coachly_api::state::AppState;
use coachly_api::voice::training::TrainingStatusStore;
use coachly_db::{Document, DocumentStore, Filter, FindOptions, MemoryDocumentStore, StoreError};
use coachly_llm::ModelGateway;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin, a 30-second request
/// timeout, [`ADMIN_EMAIL`] as the only admin and voice files under
/// `voice_root`.
pub fn test_config(voice_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        stream_timeout_secs: 30,
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        identity: IdentityConfig {
            jwt_secret: Some(TEST_SECRET.to_string()),
            ..IdentityConfig::default()
        },
        voice: VoiceConfig {
            models_dir: voice_root.join("models"),
            audio_dir: voice_root.join("audio"),
            training_step_ms: 0,
        },
    }
}

/// A router over an in-memory store. Clones share the same state.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
    /// Keeps the voice file root alive for the test's duration.
    pub voice_root: tempfile::TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers, backed by
/// a fresh in-memory store and the given gateway.
pub fn build_test_app(gateway: Arc<dyn ModelGateway>) -> TestApp {
    build_test_app_with(gateway, |_| {})
}

/// Like [`build_test_app`], with `configure` applied to the server config.
pub fn build_test_app_with(
    gateway: Arc<dyn ModelGateway>,
    configure: impl FnOnce(&mut ServerConfig),
) -> TestApp {
    let voice_root = tempfile::tempdir().expect("failed to create voice root");
    let store = Arc::new(MemoryDocumentStore::new());
    let router = assemble(gateway, store.clone(), voice_root.path(), configure);
    TestApp {
        router,
        store,
        voice_root,
    }
}

/// A router whose document store fails every call. The returned directory
/// holds voice files and must outlive the router.
pub fn build_failing_store_app(gateway: Arc<dyn ModelGateway>) -> (Router, tempfile::TempDir) {
    let voice_root = tempfile::tempdir().expect("failed to create voice root");
    let router = assemble(gateway, Arc::new(FailingStore), voice_root.path(), |_| {});
    (router, voice_root)
}

fn assemble(
    gateway: Arc<dyn ModelGateway>,
    store: Arc<dyn DocumentStore>,
    voice_root: &std::path::Path,
    configure: impl FnOnce(&mut ServerConfig),
) -> Router {
    let mut config = test_config(voice_root);
    configure(&mut config);

    let state = AppState {
        store,
        gateway,
        identity: Arc::new(SharedSecretVerifier::new(TEST_SECRET, &config.identity)),
        config: Arc::new(config.clone()),
        training: Arc::new(TrainingStatusStore::new()),
    };
    build_app_router(state, &config)
}

/// Document store whose every operation fails, as an unreachable database
/// would.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::InvalidDocument("store unavailable".into())
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn insert(&self, _: &str, _: Map<String, Value>) -> Result<Document, StoreError> {
        Err(unavailable())
    }

    async fn find(&self, _: &str, _: &Filter, _: &FindOptions) -> Result<Vec<Document>, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _: &str, _: &Filter, _: Map<String, Value>) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _: &str, _: &Filter) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn count(&self, _: &str, _: &Filter) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// A valid bearer token for `uid`.
pub fn token(uid: &str, email: Option<&str>) -> String {
    issue_token(uid, email, TEST_SECRET, 3600).expect("failed to issue token")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, authed(Method::GET, uri, token).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(Method::POST, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(Method::PUT, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, authed(Method::DELETE, uri, token).body(Body::empty()).unwrap()).await
}

/// Send a multipart form with a single file field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    filename: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "coachly-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = authed(Method::POST, uri, token)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
