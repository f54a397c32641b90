//! Repository for certification profiles and recommendation history.

use serde_json::{json, Value};

use crate::collections::CERTIFICATIONS;
use crate::error::StoreError;
use crate::models::certification::{
    CertificationProfile, CertificationRecommendation, ProfileInput, PROFILE_TYPE,
    RECOMMENDATION_TYPE,
};
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

pub struct CertificationRepo;

fn profile_of(user_id: &str) -> Filter {
    Filter::new()
        .eq("type", PROFILE_TYPE)
        .eq("user_id", user_id)
}

impl CertificationRepo {
    /// Create or replace the user's profile.
    pub async fn save_profile(
        store: &dyn DocumentStore,
        user_id: &str,
        input: &ProfileInput,
    ) -> Result<CertificationProfile, StoreError> {
        let fields = to_body(input)?;
        let modified = store
            .update(CERTIFICATIONS, &profile_of(user_id), fields.clone())
            .await?;

        if modified == 0 {
            let mut body = fields;
            body.insert("type".into(), Value::String(PROFILE_TYPE.into()));
            body.insert("user_id".into(), Value::String(user_id.into()));
            store.insert(CERTIFICATIONS, body).await?;
        }

        Self::find_profile(store, user_id).await?.ok_or_else(|| {
            StoreError::InvalidDocument(format!("profile for {user_id} vanished after save"))
        })
    }

    pub async fn find_profile(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Option<CertificationProfile>, StoreError> {
        store
            .find_one(CERTIFICATIONS, &profile_of(user_id))
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn record_recommendation(
        store: &dyn DocumentStore,
        user_id: &str,
        profile: &ProfileInput,
        recommendations: &str,
    ) -> Result<CertificationRecommendation, StoreError> {
        let body = to_body(&json!({
            "type": RECOMMENDATION_TYPE,
            "user_id": user_id,
            "profile": profile,
            "recommendations": recommendations,
        }))?;
        store.insert(CERTIFICATIONS, body).await?.decode()
    }

    /// A user's recommendation history, newest first.
    pub async fn list_recommendations(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<CertificationRecommendation>, StoreError> {
        let filter = Filter::new()
            .eq("type", RECOMMENDATION_TYPE)
            .eq("user_id", user_id);
        let docs = store
            .find(CERTIFICATIONS, &filter, &FindOptions::newest_first())
            .await?;
        decode_all(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;

    fn profile(role: &str) -> ProfileInput {
        ProfileInput {
            role: role.into(),
            skills: vec!["SQL".into()],
            goals: "Lead a team".into(),
            experience_level: "intermediate".into(),
        }
    }

    #[tokio::test]
    async fn save_profile_upserts() {
        let store = MemoryDocumentStore::new();
        let first = CertificationRepo::save_profile(&store, "u1", &profile("Analyst"))
            .await
            .unwrap();
        let second = CertificationRepo::save_profile(&store, "u1", &profile("Lead"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.role, "Lead");
        assert_eq!(
            store.count(CERTIFICATIONS, &profile_of("u1")).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn recommendations_do_not_count_as_profiles() {
        let store = MemoryDocumentStore::new();
        CertificationRepo::record_recommendation(&store, "u1", &profile("Analyst"), "Take X")
            .await
            .unwrap();

        assert!(CertificationRepo::find_profile(&store, "u1").await.unwrap().is_none());
        let history = CertificationRepo::list_recommendations(&store, "u1")
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].recommendations, "Take X");
    }
}
