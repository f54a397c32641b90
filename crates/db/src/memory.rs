//! In-process [`DocumentStore`] used when no database is configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{
    new_doc_id, stamp_for_insert, stamp_for_update, Document, DocumentStore, Filter, FindOptions,
};

/// Collections held in a `HashMap` behind a single async lock.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_key<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
    doc.body.get(field)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(
        &self,
        collection: &str,
        body: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let doc = Document {
            id: new_doc_id(),
            body: stamp_for_insert(body),
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        let mut docs: Vec<Document> = guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        drop(guard);

        if let Some(field) = &options.sort_desc_by {
            // Stable sort: equal keys keep insertion order.
            docs.sort_by(|a, b| compare_values(sort_key(b, field), sort_key(a, field)));
        }
        if let Some(limit) = options.limit {
            docs.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(docs)
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        fields: Map<String, Value>,
    ) -> Result<u64, StoreError> {
        let fields = stamp_for_update(fields);
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let mut modified = 0;
        for doc in docs.iter_mut().filter(|d| filter.matches(d)) {
            for (key, value) in &fields {
                doc.body.insert(key.clone(), value.clone());
            }
            modified += 1;
        }
        Ok(modified)
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("lessons", body(json!({"title": "Listening"})))
            .await
            .unwrap();

        let found = store
            .find_one("lessons", &Filter::by_id(doc.id.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("title"), Some("Listening"));
        assert!(found.body.contains_key("created_at"));
        assert!(found.body.contains_key("updated_at"));
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.insert("teams", body(json!({"name": "a"}))).await.unwrap();
        assert_eq!(store.count("lessons", &Filter::new()).await.unwrap(), 0);
        assert_eq!(store.count("teams", &Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_sorts_descending_and_limits() {
        let store = MemoryDocumentStore::new();
        for (title, at) in [
            ("old", "2026-01-01T00:00:00.000000Z"),
            ("new", "2026-03-01T00:00:00.000000Z"),
            ("mid", "2026-02-01T00:00:00.000000Z"),
        ] {
            store
                .insert("lessons", body(json!({"title": title, "created_at": at})))
                .await
                .unwrap();
        }

        let options = FindOptions {
            sort_desc_by: Some("created_at".into()),
            limit: Some(2),
        };
        let docs = store.find("lessons", &Filter::new(), &options).await.unwrap();
        let titles: Vec<_> = docs.iter().filter_map(|d| d.get_str("title")).collect();
        assert_eq!(titles, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn update_merges_fields_and_reports_count() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("teams", body(json!({"name": "a", "description": "d"})))
            .await
            .unwrap();

        let modified = store
            .update("teams", &Filter::by_id(doc.id.clone()), body(json!({"name": "b"})))
            .await
            .unwrap();
        assert_eq!(modified, 1);

        let found = store
            .find_one("teams", &Filter::by_id(doc.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("name"), Some("b"));
        assert_eq!(found.get_str("description"), Some("d"));

        let missing = store
            .update("teams", &Filter::by_id("nope"), body(json!({"name": "c"})))
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[tokio::test]
    async fn delete_by_field() {
        let store = MemoryDocumentStore::new();
        store
            .insert("team_members", body(json!({"team_id": "t1"})))
            .await
            .unwrap();
        store
            .insert("team_members", body(json!({"team_id": "t1"})))
            .await
            .unwrap();
        store
            .insert("team_members", body(json!({"team_id": "t2"})))
            .await
            .unwrap();

        let deleted = store
            .delete("team_members", &Filter::new().eq("team_id", "t1"))
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.count("team_members", &Filter::new()).await.unwrap(), 1);
    }
}
