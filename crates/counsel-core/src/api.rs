//! API seams consumed by the controllers.
//!
//! These traits are the only place the controllers touch the network. The
//! `reqwest` implementation lives in `counsel-client`; tests substitute
//! in-memory mocks.

use crate::chat::{Message, Session, SessionSummary};
use crate::document::Document;
use crate::error::Result;
use crate::identity::User;
use crate::teacher::StudentRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Successful login/registration response: a bearer token plus the user it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Student-side chat endpoints.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Lists the caller's sessions, most recently updated first.
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Fetches one session with its full message history.
    async fn get_session(&self, session_id: i64) -> Result<Session>;

    /// Creates a new session with the given title.
    async fn create_session(&self, title: &str) -> Result<Session>;

    /// Sends a user message and returns the assistant's reply.
    async fn send_message(&self, session_id: i64, content: &str) -> Result<Message>;

    /// Deletes a session. Deleting an already-absent session is not an error
    /// the controllers care to distinguish.
    async fn delete_session(&self, session_id: i64) -> Result<()>;
}

/// Teacher-side read endpoints.
#[async_trait]
pub trait TeacherApi: Send + Sync {
    /// Lists every student with embedded session summaries.
    async fn list_students(&self) -> Result<Vec<StudentRecord>>;

    /// Fetches one student session's full transcript.
    async fn get_session_detail(&self, session_id: i64) -> Result<Session>;
}

/// Reference document endpoints.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Uploads a document as multipart form content.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<Document>;
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    async fn register(&self, registration: &Registration) -> Result<AuthResponse>;

    /// Resolves the user behind the current bearer token.
    async fn me(&self) -> Result<User>;
}
