//! Mock API implementations and fixtures shared by the controller tests.

use async_trait::async_trait;
use counsel_core::api::{AuthApi, AuthResponse, ChatApi, Credentials, DocumentApi, Registration, TeacherApi};
use counsel_core::chat::{Message, MessageRole, Session, SessionSummary};
use counsel_core::document::Document;
use counsel_core::error::{CounselError, Result};
use counsel_core::identity::{Role, User};
use counsel_core::teacher::StudentRecord;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

pub fn timestamp(raw: &str) -> chrono::DateTime<chrono::Utc> {
    raw.parse().expect("fixture timestamp")
}

pub fn session(id: i64, title: &str) -> Session {
    Session {
        id,
        title: title.to_string(),
        created_at: timestamp("2025-03-01T08:00:00Z"),
        updated_at: timestamp("2025-03-01T08:00:00Z"),
        messages: Vec::new(),
    }
}

pub fn server_message(id: i64, role: MessageRole, content: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "role": match role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        },
        "content": content,
        "created_at": "2025-03-01T08:00:05Z",
    }))
    .expect("fixture message")
}

pub fn student(user_id: i64, username: &str, sessions: Vec<Session>) -> StudentRecord {
    StudentRecord {
        user_id,
        username: username.to_string(),
        full_name: None,
        email: format!("{}@example.com", username),
        sessions,
    }
}

pub fn user(role: Role) -> User {
    User {
        id: 9,
        username: "someone".to_string(),
        email: "someone@example.com".to_string(),
        full_name: Some("Some One".to_string()),
        role,
    }
}

fn unavailable() -> CounselError {
    CounselError::transport("mock: backend unavailable")
}

/// In-memory `ChatApi`. Sessions created through it get sequential ids; every
/// failure switch makes the corresponding call fail with a transport error.
#[derive(Default)]
pub struct MockChatApi {
    pub sessions: Mutex<Vec<Session>>,
    next_id: AtomicI64,
    pub fail_list: std::sync::atomic::AtomicBool,
    pub fail_create: std::sync::atomic::AtomicBool,
    pub fail_get: std::sync::atomic::AtomicBool,
    pub fail_send: std::sync::atomic::AtomicBool,
    pub fail_delete: std::sync::atomic::AtomicBool,
    pub send_calls: AtomicUsize,
}

impl MockChatApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        let max_id = sessions.iter().map(|s| s.id).max().unwrap_or(0);
        let mock = Self::new();
        mock.next_id.store(max_id + 1, Ordering::SeqCst);
        *mock.sessions.lock().unwrap() = sessions;
        mock
    }

    pub fn send_call_count(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut sessions = self.sessions.lock().unwrap().clone();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions.iter().map(SessionSummary::from).collect())
    }

    async fn get_session(&self, session_id: i64) -> Result<Session> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| CounselError::not_found("session", session_id.to_string()))
    }

    async fn create_session(&self, title: &str) -> Result<Session> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = session(id, title);
        self.sessions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn send_message(&self, session_id: i64, content: &str) -> Result<Message> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| CounselError::not_found("session", session_id.to_string()))?;
        session.updated_at = timestamp("2025-03-01T10:00:00Z");
        Ok(server_message(
            100,
            MessageRole::Assistant,
            &format!("echo: {}", content),
        ))
    }

    async fn delete_session(&self, session_id: i64) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.sessions.lock().unwrap().retain(|s| s.id != session_id);
        Ok(())
    }
}

/// In-memory `TeacherApi`.
#[derive(Default)]
pub struct MockTeacherApi {
    pub students: Mutex<Vec<StudentRecord>>,
    pub fail_list: std::sync::atomic::AtomicBool,
    pub fail_detail: std::sync::atomic::AtomicBool,
}

impl MockTeacherApi {
    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        let mock = Self::default();
        *mock.students.lock().unwrap() = students;
        mock
    }
}

#[async_trait]
impl TeacherApi for MockTeacherApi {
    async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.students.lock().unwrap().clone())
    }

    async fn get_session_detail(&self, session_id: i64) -> Result<Session> {
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.students
            .lock()
            .unwrap()
            .iter()
            .flat_map(|s| s.sessions.iter())
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| CounselError::not_found("session", session_id.to_string()))
    }
}

/// In-memory `DocumentApi` that records uploads.
#[derive(Default)]
pub struct MockDocumentApi {
    pub documents: Mutex<Vec<Document>>,
    pub upload_calls: AtomicUsize,
    pub fail_upload: std::sync::atomic::AtomicBool,
    pub upload_error_detail: Mutex<Option<String>>,
}

impl MockDocumentApi {
    pub fn upload_call_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentApi for MockDocumentApi {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn upload(&self, filename: &str, _bytes: Vec<u8>) -> Result<Document> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(match self.upload_error_detail.lock().unwrap().clone() {
                Some(detail) => CounselError::api(400, detail),
                None => unavailable(),
            });
        }
        let document = Document {
            id: self.documents.lock().unwrap().len() as i64 + 1,
            filename: filename.to_string(),
            uploaded_at: timestamp("2025-03-02T12:00:00Z"),
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }
}

/// `AuthApi` that accepts exactly one username/password pair.
pub struct MockAuthApi {
    pub user: User,
    pub password: String,
    pub login_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new(user: User, password: &str) -> Self {
        Self {
            user,
            password: password.to_string(),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if credentials.username == self.user.username && credentials.password == self.password {
            Ok(AuthResponse {
                access_token: "token-1".to_string(),
                token_type: "bearer".to_string(),
                user: self.user.clone(),
            })
        } else {
            Err(CounselError::api(401, "Invalid username or password"))
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        let mut user = self.user.clone();
        user.username = registration.username.clone();
        user.email = registration.email.clone();
        user.full_name = Some(registration.full_name.clone());
        Ok(AuthResponse {
            access_token: "token-2".to_string(),
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn me(&self) -> Result<User> {
        Ok(self.user.clone())
    }
}
