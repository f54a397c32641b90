//! Repository for simulation and career-coach session logs.

use crate::collections::SESSIONS;
use crate::error::StoreError;
use crate::models::session::{CreateSessionLog, SessionKind, SessionLog};
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

pub struct SessionRepo;

impl SessionRepo {
    pub async fn log(
        store: &dyn DocumentStore,
        input: &CreateSessionLog,
    ) -> Result<SessionLog, StoreError> {
        store.insert(SESSIONS, to_body(input)?).await?.decode()
    }

    /// A user's sessions of one kind, newest first.
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
        kind: SessionKind,
    ) -> Result<Vec<SessionLog>, StoreError> {
        let filter = Filter::new()
            .eq("user_id", user_id)
            .eq("kind", kind.as_str());
        let docs = store
            .find(SESSIONS, &filter, &FindOptions::newest_first())
            .await?;
        decode_all(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;
    use coachly_core::conversation::Turn;
    use serde_json::json;

    #[tokio::test]
    async fn logs_are_split_by_kind() {
        let store = MemoryDocumentStore::new();
        let entry = CreateSessionLog {
            user_id: "u1".into(),
            kind: SessionKind::Simulation,
            history: vec![Turn::new("Customer", "Hi")],
            user_input: Some("Hello".into()),
            response: json!({"customerText": "ok", "choices": []}),
        };
        let logged = SessionRepo::log(&store, &entry).await.unwrap();
        assert_eq!(logged.kind, SessionKind::Simulation);

        let coach = SessionRepo::list_for_user(&store, "u1", SessionKind::CareerCoach)
            .await
            .unwrap();
        assert!(coach.is_empty());
        let sims = SessionRepo::list_for_user(&store, "u1", SessionKind::Simulation)
            .await
            .unwrap();
        assert_eq!(sims.len(), 1);
        assert_eq!(sims[0].history.len(), 1);
    }
}
