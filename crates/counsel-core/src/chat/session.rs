//! Chat session domain model.
//!
//! A session is one conversation thread: identified, titled, holding an
//! ordered message history. The backend serves two shapes: the full session
//! (with messages) and a list-item summary (with counts instead).

use super::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation thread with its full message history.
///
/// Messages are append-only and chronologically ordered; past messages are
/// never mutated or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Empty when the server sent only a summary-shaped session.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A session as it appears in the sidebar list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub message_count: usize,
    #[serde(default)]
    pub last_message: Option<String>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            title: session.title.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            message_count: session.messages.len(),
            last_message: session.messages.last().map(|m| m.content.clone()),
        }
    }
}
