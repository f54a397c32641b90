use std::net::SocketAddr;
use std::sync::Arc;

use coachly_db::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use coachly_llm::{LlmConfig, ModelGateway, OpenAiGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coachly_api::auth::build_verifier;
use coachly_api::config::ServerConfig;
use coachly_api::router::build_app_router;
use coachly_api::state::AppState;
use coachly_api::voice::training::TrainingStatusStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coachly_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let llm_config = LlmConfig::from_env();
    if llm_config.has_credential() {
        tracing::info!(model = %llm_config.model, "Model provider configured");
    } else {
        tracing::warn!("OPENAI_API_KEY not set; all model responses will be mocked");
    }

    // --- Document store ---
    let store: Arc<dyn DocumentStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) if !database_url.trim().is_empty() => {
            let pool = coachly_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            coachly_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgDocumentStore::new(pool))
        }
        _ => {
            tracing::warn!("DATABASE_URL not set; records are kept in memory only");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    store
        .health_check()
        .await
        .expect("Document store health check failed");
    tracing::info!(backend = store.backend(), "Document store ready");

    // --- App state ---
    let gateway: Arc<dyn ModelGateway> = Arc::new(OpenAiGateway::new(llm_config));
    let state = AppState {
        store,
        gateway,
        identity: build_verifier(&config.identity),
        config: Arc::new(config.clone()),
        training: Arc::new(TrainingStatusStore::new()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
