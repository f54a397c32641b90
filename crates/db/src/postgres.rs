//! Postgres-backed [`DocumentStore`]: every collection shares the
//! `documents` table and field filters use JSONB containment.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::StoreError;
use crate::store::{
    new_doc_id, stamp_for_insert, stamp_for_update, Document, DocumentStore, Filter, FindOptions,
};

/// A row from the `documents` table.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    body: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            body: row.body.0,
        }
    }
}

/// Shared predicate: `$1` collection, `$2` optional id, `$3` containment object.
const MATCH_CLAUSE: &str = "\
    collection = $1 \
    AND ($2::text IS NULL OR id = $2) \
    AND body @> $3::jsonb";

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn containment(filter: &Filter) -> Json<Value> {
    Json(Value::Object(filter.fields.clone()))
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(
        &self,
        collection: &str,
        body: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let id = new_doc_id();
        let body = stamp_for_insert(body);
        let row = sqlx::query_as::<_, DocumentRow>(
            "INSERT INTO documents (id, collection, body) \
             VALUES ($1, $2, $3) \
             RETURNING id, body",
        )
        .bind(&id)
        .bind(collection)
        .bind(Json(&body))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        // A NULL sort key orders nothing; a NULL limit returns every row.
        let query = format!(
            "SELECT id, body FROM documents WHERE {MATCH_CLAUSE} \
             ORDER BY body ->> $4::text DESC NULLS LAST, created_at ASC \
             LIMIT $5"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(filter.id.as_deref())
            .bind(containment(filter))
            .bind(options.sort_desc_by.as_deref())
            .bind(options.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Map<String, Value>,
    ) -> Result<u64, StoreError> {
        let fields = stamp_for_update(fields);
        let query = format!(
            "UPDATE documents SET body = body || $4::jsonb, updated_at = now() \
             WHERE {MATCH_CLAUSE}"
        );
        let result = sqlx::query(&query)
            .bind(collection)
            .bind(filter.id.as_deref())
            .bind(containment(filter))
            .bind(Json(&fields))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let query = format!("DELETE FROM documents WHERE {MATCH_CLAUSE}");
        let result = sqlx::query(&query)
            .bind(collection)
            .bind(filter.id.as_deref())
            .bind(containment(filter))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let query = format!("SELECT COUNT(*) FROM documents WHERE {MATCH_CLAUSE}");
        let count: i64 = sqlx::query_scalar(&query)
            .bind(collection)
            .bind(filter.id.as_deref())
            .bind(containment(filter))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
