//! Document storage for Coachly.
//!
//! Records are schemaless JSON objects grouped into named collections.
//! [`DocumentStore`] is the seam; [`PgDocumentStore`] keeps them in a single
//! Postgres JSONB table and [`MemoryDocumentStore`] keeps them in process.
//! Typed access for each record kind lives in [`repositories`].

pub mod collections;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{Document, DocumentStore, Filter, FindOptions};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
