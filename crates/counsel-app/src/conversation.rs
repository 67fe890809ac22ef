//! The send protocol for the active conversation.

use crate::session_store::SessionStore;
use counsel_core::chat::{DeliveryStatus, Message};

/// Title given to sessions created implicitly by the first send.
pub const DEFAULT_SESSION_TITLE: &str = "New conversation";

/// Drives the active session's message sequence and the send protocol.
///
/// Sends are serialized, never queued: while one send is in flight the
/// `pending` flag makes further sends no-ops. The optimistic user message is
/// appended to the displayed sequence before the request is issued, and is
/// never rolled back — a failed send marks it [`DeliveryStatus::Failed`]
/// instead.
pub struct ConversationController {
    store: SessionStore,
    input: String,
    pending: bool,
}

impl ConversationController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            input: String::new(),
            pending: false,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    /// Current content of the input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// True while a send is in flight; further sends are rejected until the
    /// current one settles.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Makes sure a session exists to send into, creating one when none is
    /// active. Returns the session id, or `None` when creation failed — in
    /// which case the send must abort before any optimistic append.
    async fn ensure_session(&mut self) -> Option<i64> {
        if let Some(session) = self.store.active() {
            return Some(session.id);
        }
        match self.store.create_session(DEFAULT_SESSION_TITLE).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!("failed to create session for send: {}", e);
                None
            }
        }
    }

    /// Sends the input buffer to the assistant.
    ///
    /// Empty or whitespace-only input is a no-op, as is sending while a
    /// previous send is still pending. The user message is displayed
    /// optimistically before the network call; on success the assistant
    /// reply is appended and the session list refreshed (titles and ordering
    /// may have changed server-side); on failure the optimistic message is
    /// kept, marked failed. The pending flag clears however the request
    /// settles.
    pub async fn send(&mut self) {
        let content = self.input.trim().to_string();
        if content.is_empty() || self.pending {
            return;
        }

        let Some(session_id) = self.ensure_session().await else {
            return;
        };

        let message = Message::local_user(content.clone());
        let local_id = message.local_id;
        self.store.push_message(message);
        self.input.clear();
        self.pending = true;

        let result = self.store.api().send_message(session_id, &content).await;
        match result {
            Ok(reply) => {
                self.store.settle_message(local_id, DeliveryStatus::Sent);
                self.store.push_message(reply);
                self.store.refresh().await;
            }
            Err(e) => {
                tracing::error!(session_id, "failed to send message: {}", e);
                self.store.settle_message(local_id, DeliveryStatus::Failed);
            }
        }
        self.pending = false;
    }
}
