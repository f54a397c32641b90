//! The [`DocumentStore`] trait and the value types it works with.

use async_trait::async_trait;
use coachly_core::types::{now_timestamp, DocId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// Body field holding the insert time.
pub const CREATED_AT: &str = "created_at";
/// Body field holding the last update time.
pub const UPDATED_AT: &str = "updated_at";

/// A stored record: its generated id plus a JSON object body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub body: Map<String, Value>,
}

impl Document {
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    /// The body with the id merged in under `id`.
    pub fn to_record(&self) -> Value {
        let mut record = self.body.clone();
        record.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(record)
    }

    /// Deserialize the record (body plus `id`) into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(self.to_record())?)
    }
}

/// Record selection: an optional id plus top-level field equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub id: Option<DocId>,
    pub fields: Map<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<DocId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: Map::new(),
        }
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Whether `doc` satisfies every condition of this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(id) = &self.id {
            if &doc.id != id {
                return false;
            }
        }
        self.fields
            .iter()
            .all(|(field, expected)| doc.body.get(field) == Some(expected))
    }
}

/// Ordering and paging for [`DocumentStore::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Body field to sort on, descending. Timestamp fields are stored in a
    /// fixed-width format, so the lexical order is the time order.
    pub sort_desc_by: Option<String>,
    pub limit: Option<i64>,
}

impl FindOptions {
    /// Newest first by `created_at`.
    pub fn newest_first() -> Self {
        Self {
            sort_desc_by: Some(CREATED_AT.to_string()),
            limit: None,
        }
    }
}

/// Named collections of schemaless records.
///
/// No operation spans more than one collection and none is transactional
/// with respect to another call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;

    /// Store a new record and return it with its generated id.
    ///
    /// `created_at` is kept if the caller set it; `updated_at` is always set.
    async fn insert(
        &self,
        collection: &str,
        body: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let options = FindOptions {
            sort_desc_by: None,
            limit: Some(1),
        };
        Ok(self
            .find(collection, filter, &options)
            .await?
            .into_iter()
            .next())
    }

    /// Replace the given top-level fields on every matching record.
    ///
    /// Returns the number of records modified.
    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Map<String, Value>,
    ) -> Result<u64, StoreError>;

    /// Returns the number of records deleted.
    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Generate a new document id.
pub(crate) fn new_doc_id() -> DocId {
    uuid::Uuid::now_v7().to_string()
}

/// Prepare a body for insertion: drop any caller-supplied `id` and stamp
/// the timestamps.
pub(crate) fn stamp_for_insert(mut body: Map<String, Value>) -> Map<String, Value> {
    let now = now_timestamp();
    body.remove("id");
    body.entry(CREATED_AT.to_string())
        .or_insert_with(|| Value::String(now.clone()));
    body.insert(UPDATED_AT.to_string(), Value::String(now));
    body
}

/// Prepare a partial update: `id` cannot change, `updated_at` is refreshed.
pub(crate) fn stamp_for_update(mut fields: Map<String, Value>) -> Map<String, Value> {
    fields.remove("id");
    fields.insert(UPDATED_AT.to_string(), Value::String(now_timestamp()));
    fields
}

/// Serialize a typed value into a JSON object body.
pub fn to_body<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
