//! Repository for the `unknown_intents` collection (the feature roadmap).

use coachly_core::intent::ClassificationResult;
use coachly_core::validation::DEFAULT_IDEA_STATUS;
use serde_json::{json, Map, Value};

use crate::collections::UNKNOWN_INTENTS;
use crate::error::StoreError;
use crate::models::idea::Idea;
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

pub struct IdeaRepo;

impl IdeaRepo {
    /// Record a request the router could not place.
    pub async fn log_unknown_intent(
        store: &dyn DocumentStore,
        user_id: Option<&str>,
        user_input: &str,
        classification: &ClassificationResult,
    ) -> Result<Idea, StoreError> {
        let body = to_body(&json!({
            "user_id": user_id,
            "user_input": user_input,
            "classification": classification,
            "status": DEFAULT_IDEA_STATUS,
            "upvotes": 0,
            "subscribers": [],
        }))?;
        store.insert(UNKNOWN_INTENTS, body).await?.decode()
    }

    /// All ideas, newest first.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Idea>, StoreError> {
        let docs = store
            .find(UNKNOWN_INTENTS, &Filter::new(), &FindOptions::newest_first())
            .await?;
        decode_all(docs)
    }

    pub async fn find(store: &dyn DocumentStore, id: &str) -> Result<Option<Idea>, StoreError> {
        store
            .find_one(UNKNOWN_INTENTS, &Filter::by_id(id))
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, StoreError> {
        Ok(store.delete(UNKNOWN_INTENTS, &Filter::by_id(id)).await? > 0)
    }

    /// Increment the upvote count and return the new total.
    ///
    /// This is a read-then-write; concurrent upvotes on the same idea can
    /// lose an increment.
    pub async fn upvote(store: &dyn DocumentStore, id: &str) -> Result<Option<i64>, StoreError> {
        let Some(idea) = Self::find(store, id).await? else {
            return Ok(None);
        };
        let upvotes = idea.upvotes + 1;
        Self::set_field(store, id, "upvotes", json!(upvotes)).await?;
        Ok(Some(upvotes))
    }

    /// Add `email` to the idea's subscribers. Subscribing twice is a no-op.
    ///
    /// Returns `false` if the idea does not exist.
    pub async fn subscribe(
        store: &dyn DocumentStore,
        id: &str,
        email: &str,
    ) -> Result<bool, StoreError> {
        let Some(mut idea) = Self::find(store, id).await? else {
            return Ok(false);
        };
        if !idea.subscribers.iter().any(|s| s.eq_ignore_ascii_case(email)) {
            idea.subscribers.push(email.to_string());
            Self::set_field(store, id, "subscribers", json!(idea.subscribers)).await?;
        }
        Ok(true)
    }

    /// Returns `false` if the idea does not exist. The status is not validated here.
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        status: &str,
    ) -> Result<bool, StoreError> {
        Ok(Self::set_field(store, id, "status", json!(status)).await? > 0)
    }

    async fn set_field(
        store: &dyn DocumentStore,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<u64, StoreError> {
        let mut fields = Map::new();
        fields.insert(field.to_string(), value);
        store.update(UNKNOWN_INTENTS, &Filter::by_id(id), fields).await
    }
}
