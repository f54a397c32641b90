//! Conversation turns and role-tagged chat messages.

use serde::{Deserialize, Serialize};

/// Role of a chat message sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One turn of a client-held conversation history.
///
/// Both `speaker` and `text` are optional on the wire: incomplete turns are
/// accepted and skipped when the history is flattened, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user_choice: Option<String>,
}

impl Turn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: Some(text.into()),
            user_choice: None,
        }
    }

    /// The `(speaker, text)` pair, or `None` when either is missing.
    pub fn parts(&self) -> Option<(&str, &str)> {
        Some((self.speaker.as_deref()?, self.text.as_deref()?))
    }
}

/// Speaker names that map to the assistant role in coaching conversations.
const ASSISTANT_SPEAKERS: &[&str] = &["assistant", "coach", "ai", "bot"];

/// Flatten a turn history into prompt text, one `speaker: text` line per turn.
///
/// Turns missing `speaker` or `text` are dropped; the rest keep their order.
pub fn flatten_history(turns: &[Turn]) -> String {
    turns
        .iter()
        .filter_map(Turn::parts)
        .map(|(speaker, text)| format!("{speaker}: {text}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a turn history into chat messages after a leading system prompt.
///
/// Assistant-like speakers become [`Role::Assistant`]; everyone else is the
/// user. Incomplete turns are dropped as in [`flatten_history`].
pub fn to_chat_messages(system_prompt: &str, turns: &[Turn]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(turns.iter().filter_map(Turn::parts).map(|(speaker, text)| {
        let speaker = speaker.trim().to_lowercase();
        if ASSISTANT_SPEAKERS.contains(&speaker.as_str()) {
            ChatMessage::assistant(text)
        } else {
            ChatMessage::user(text)
        }
    }));
    messages
}
