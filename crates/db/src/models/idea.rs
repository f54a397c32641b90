//! Unknown-intent ideas collected for the feature roadmap.

use coachly_core::intent::ClassificationResult;
use coachly_core::types::DocId;
use serde::{Deserialize, Serialize};

/// A request the router could not send to any module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: DocId,
    #[serde(default)]
    pub user_id: Option<String>,
    pub user_input: String,
    pub classification: ClassificationResult,
    pub status: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub subscribers: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An idea as shown to non-admins: no submitter and no subscriber emails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaListing {
    pub id: DocId,
    pub user_input: String,
    pub classification: ClassificationResult,
    pub status: String,
    pub upvotes: i64,
    pub subscriber_count: usize,
    /// Whether the viewer's email is among the subscribers.
    pub subscribed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Idea {
    pub fn listing(self, viewer_email: Option<&str>) -> IdeaListing {
        let subscribed = viewer_email.is_some_and(|email| {
            self.subscribers
                .iter()
                .any(|subscriber| subscriber.eq_ignore_ascii_case(email))
        });
        IdeaListing {
            id: self.id,
            user_input: self.user_input,
            classification: self.classification,
            status: self.status,
            upvotes: self.upvotes,
            subscriber_count: self.subscribers.len(),
            subscribed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeIdea {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIdeaStatus {
    pub status: String,
}
