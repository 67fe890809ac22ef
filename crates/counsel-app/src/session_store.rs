//! Session list and active-session state for the student chat view.

use counsel_core::api::ChatApi;
use counsel_core::chat::{DeliveryStatus, Message, Session, SessionSummary};
use counsel_core::error::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Blocking confirmation asked before a session is deleted.
///
/// Injected so the UI decides how to ask (modal, terminal prompt, ...). The
/// delete is abandoned, with no network call, when this returns `false`.
pub type ConfirmPrompt = Arc<dyn Fn(&SessionSummary) -> bool + Send + Sync>;

/// Owns a student's session list, the active session, and the displayed
/// message sequence.
///
/// The session list is kept most-recently-updated first: the server's order
/// is trusted on refresh, and locally created sessions go to the head.
/// Fetch failures are logged and leave the previous state in place — stale
/// but available beats empty.
pub struct SessionStore {
    api: Arc<dyn ChatApi>,
    confirm_delete: ConfirmPrompt,
    sessions: Vec<SessionSummary>,
    active: Option<Session>,
    messages: Vec<Message>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn ChatApi>, confirm_delete: ConfirmPrompt) -> Self {
        Self {
            api,
            confirm_delete,
            sessions: Vec::new(),
            active: None,
            messages: Vec::new(),
        }
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// The message sequence the conversation view renders, including
    /// optimistic messages not yet confirmed by the server.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn api(&self) -> Arc<dyn ChatApi> {
        Arc::clone(&self.api)
    }

    /// Appends to the displayed sequence. Append-only: nothing ever removes
    /// or reorders past messages.
    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Settles the delivery status of a locally appended message.
    pub(crate) fn settle_message(&mut self, local_id: Uuid, status: DeliveryStatus) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.local_id == local_id) {
            message.status = status;
        }
    }

    /// Fetches and replaces the session list.
    ///
    /// On failure the stale list is kept and the error only logged; the
    /// sidebar staying slightly out of date is not worth blocking the view.
    pub async fn refresh(&mut self) {
        match self.api.list_sessions().await {
            Ok(sessions) => self.sessions = sessions,
            Err(e) => tracing::warn!("failed to refresh session list: {}", e),
        }
    }

    /// Creates a session on the server, inserts it at the head of the list,
    /// makes it active, and clears the displayed messages.
    ///
    /// Failure aborts without touching any state.
    pub async fn create_session(&mut self, title: &str) -> Result<i64> {
        let session = self.api.create_session(title).await?;
        self.sessions.insert(0, SessionSummary::from(&session));
        let id = session.id;
        self.active = Some(session);
        self.messages.clear();
        Ok(id)
    }

    /// Fetches the full session and makes it active.
    ///
    /// On failure the previously active session stays selected.
    pub async fn select_session(&mut self, session_id: i64) {
        match self.api.get_session(session_id).await {
            Ok(session) => {
                self.messages = session.messages.clone();
                self.active = Some(session);
            }
            Err(e) => tracing::warn!(session_id, "failed to load session: {}", e),
        }
    }

    /// Deletes a session after the injected confirmation prompt agrees.
    ///
    /// An id not in the current list is ignored without a network call: the
    /// prompt describes the session from its summary, and the UI only offers
    /// deletion for listed sessions. On success the session leaves the list;
    /// if it was active, the active selection and the message list are
    /// cleared too. A backend failure is logged and leaves everything as it
    /// was.
    pub async fn delete_session(&mut self, session_id: i64) {
        let Some(summary) = self.sessions.iter().find(|s| s.id == session_id) else {
            return;
        };
        if !(self.confirm_delete)(summary) {
            return;
        }

        match self.api.delete_session(session_id).await {
            Ok(()) => {
                self.sessions.retain(|s| s.id != session_id);
                if self.active.as_ref().map(|s| s.id) == Some(session_id) {
                    self.active = None;
                    self.messages.clear();
                }
            }
            Err(e) => tracing::warn!(session_id, "failed to delete session: {}", e),
        }
    }
}
