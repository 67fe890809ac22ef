//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message authored by the student.
    User,
    /// Message authored by the counseling assistant.
    Assistant,
}

/// Client-local delivery state of a message.
///
/// Never serialized: the wire knows nothing about delivery, only this client
/// does. Messages received from the server are `Sent` by construction; an
/// optimistically appended user message starts `Pending` and becomes `Sent`
/// or `Failed` when its send request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryStatus {
    Pending,
    #[default]
    Sent,
    Failed,
}

/// A single message in a conversation history.
///
/// `id` is assigned by the server; a locally constructed message carries
/// `None` until (if ever) the transcript is reloaded. `local_id` exists so
/// the sender can find its own optimistic message again once the request
/// settles, without relying on position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<i64>,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub status: DeliveryStatus,
    #[serde(skip, default = "Uuid::new_v4")]
    pub local_id: Uuid,
}

impl Message {
    /// Builds a locally authored user message with a client timestamp.
    ///
    /// Delivery starts out `Pending`; the send path settles it.
    pub fn local_user(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
            status: DeliveryStatus::Pending,
            local_id: Uuid::new_v4(),
        }
    }
}
