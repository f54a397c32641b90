//! Repository for the `lessons` collection.

use serde_json::{json, Map, Value};

use crate::collections::LESSONS;
use crate::error::StoreError;
use crate::models::lesson::{CreateLesson, Lesson, LessonSource, UpdateLesson};
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

/// Lessons are always scoped to their owner.
pub struct LessonRepo;

fn owned(user_id: &str, id: &str) -> Filter {
    Filter::by_id(id).eq("user_id", user_id)
}

impl LessonRepo {
    pub async fn create(
        store: &dyn DocumentStore,
        user_id: &str,
        input: &CreateLesson,
        source: LessonSource,
    ) -> Result<Lesson, StoreError> {
        let mut body = to_body(&json!({
            "topic": input.topic,
            "lesson": input.lesson,
            "source": source,
        }))?;
        body.insert("user_id".into(), Value::String(user_id.to_string()));
        store.insert(LESSONS, body).await?.decode()
    }

    /// List a user's lessons, newest first.
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<Lesson>, StoreError> {
        let docs = store
            .find(
                LESSONS,
                &Filter::new().eq("user_id", user_id),
                &FindOptions::newest_first(),
            )
            .await?;
        decode_all(docs)
    }

    pub async fn find(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Lesson>, StoreError> {
        store
            .find_one(LESSONS, &owned(user_id, id))
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Apply the present fields and return the updated lesson, or `None`
    /// if the user has no lesson with this id.
    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, StoreError> {
        let mut fields = Map::new();
        if let Some(topic) = &input.topic {
            fields.insert("topic".into(), Value::String(topic.clone()));
        }
        if let Some(lesson) = &input.lesson {
            fields.insert("lesson".into(), Value::String(lesson.clone()));
        }

        let modified = store.update(LESSONS, &owned(user_id, id), fields).await?;
        if modified == 0 {
            return Ok(None);
        }
        Self::find(store, user_id, id).await
    }

    /// Returns `true` if a lesson was deleted.
    pub async fn delete(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        Ok(store.delete(LESSONS, &owned(user_id, id)).await? > 0)
    }
}
