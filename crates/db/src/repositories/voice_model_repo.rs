//! Repository for trained voice model metadata.

use crate::collections::VOICE_MODELS;
use crate::error::StoreError;
use crate::models::voice_model::{CreateVoiceModel, VoiceModel};
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

pub struct VoiceModelRepo;

fn of_user(user_id: &str) -> Filter {
    Filter::new().eq("user_id", user_id)
}

impl VoiceModelRepo {
    /// Store the user's voice model, replacing any earlier one.
    pub async fn upsert_for_user(
        store: &dyn DocumentStore,
        input: &CreateVoiceModel,
    ) -> Result<VoiceModel, StoreError> {
        store.delete(VOICE_MODELS, &of_user(&input.user_id)).await?;
        store.insert(VOICE_MODELS, to_body(input)?).await?.decode()
    }

    pub async fn find_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Option<VoiceModel>, StoreError> {
        store
            .find_one(VOICE_MODELS, &of_user(user_id))
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<VoiceModel>, StoreError> {
        let docs = store
            .find(VOICE_MODELS, &of_user(user_id), &FindOptions::newest_first())
            .await?;
        decode_all(docs)
    }

    /// Returns the number of records removed.
    pub async fn delete_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<u64, StoreError> {
        store.delete(VOICE_MODELS, &of_user(user_id)).await
    }
}
