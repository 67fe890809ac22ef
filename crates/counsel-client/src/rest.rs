//! REST implementation of the API seams.
//!
//! One `RestClient` serves all four traits. Every authenticated request
//! carries `Authorization: Bearer <token>` once a token has been stored;
//! attaching it here keeps credentials out of the controllers entirely.

use crate::config::ClientConfig;
use async_trait::async_trait;
use counsel_core::api::{
    AuthApi, AuthResponse, ChatApi, Credentials, DocumentApi, Registration, TeacherApi,
};
use counsel_core::chat::{Message, Session, SessionSummary};
use counsel_core::document::Document;
use counsel_core::error::{CounselError, Result};
use counsel_core::identity::User;
use counsel_core::teacher::StudentRecord;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::RwLock;

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the counseling backend.
pub struct RestClient {
    client: Client,
    config: ClientConfig,
    /// Bearer token, set after login/registration. Interior mutability so one
    /// shared client serves every controller.
    token: RwLock<Option<String>>,
}

impl RestClient {
    /// Creates a client from the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            token: RwLock::new(None),
        }
    }

    /// Creates a client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Stores the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Drops the stored bearer token.
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Applies the timeout and, when present, the bearer token.
    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.timeout(self.config.timeout);
        let token = self.token.read().expect("token lock poisoned").clone();
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .prepare(request)
            .send()
            .await
            .map_err(|e| CounselError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The backend reports failures as {"detail": ...}; keep the raw body
        // when it is shaped differently.
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), %detail, "request rejected");
        Err(CounselError::api(status.as_u16(), detail))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.client.get(self.url(path))).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| CounselError::transport(format!("decoding {} failed: {}", path, e)))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| CounselError::transport(format!("decoding {} failed: {}", path, e)))
    }
}

#[async_trait]
impl ChatApi for RestClient {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.get_json("/api/chat/sessions").await
    }

    async fn get_session(&self, session_id: i64) -> Result<Session> {
        self.get_json(&format!("/api/chat/sessions/{}", session_id))
            .await
    }

    async fn create_session(&self, title: &str) -> Result<Session> {
        self.post_json("/api/chat/sessions", &json!({ "title": title }))
            .await
    }

    async fn send_message(&self, session_id: i64, content: &str) -> Result<Message> {
        self.post_json(
            &format!("/api/chat/sessions/{}/messages", session_id),
            &json!({ "content": content }),
        )
        .await
    }

    async fn delete_session(&self, session_id: i64) -> Result<()> {
        // Status-only response; the body is not interesting.
        self.send(
            self.client
                .delete(self.url(&format!("/api/chat/sessions/{}", session_id))),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TeacherApi for RestClient {
    async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        self.get_json("/api/teacher/students").await
    }

    async fn get_session_detail(&self, session_id: i64) -> Result<Session> {
        self.get_json(&format!("/api/teacher/sessions/{}", session_id))
            .await
    }
}

#[async_trait]
impl DocumentApi for RestClient {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.get_json("/api/documents").await
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<Document> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self
            .send(
                self.client
                    .post(self.url("/api/documents/upload"))
                    .multipart(form),
            )
            .await?;
        response
            .json::<Document>()
            .await
            .map_err(|e| CounselError::transport(format!("decoding upload response failed: {}", e)))
    }
}

#[async_trait]
impl AuthApi for RestClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let response = self
            .send(
                self.client
                    .post(self.url("/api/auth/login"))
                    .json(credentials),
            )
            .await?;
        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| CounselError::transport(format!("decoding login response failed: {}", e)))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let response = self
            .send(
                self.client
                    .post(self.url("/api/auth/register"))
                    .json(registration),
            )
            .await?;
        response.json::<AuthResponse>().await.map_err(|e| {
            CounselError::transport(format!("decoding register response failed: {}", e))
        })
    }

    async fn me(&self) -> Result<User> {
        self.get_json("/api/auth/me").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_path() {
        let client = RestClient::new(ClientConfig {
            base_url: "http://localhost:8000".to_string(),
            timeout: std::time::Duration::from_secs(5),
        });
        assert_eq!(
            client.url("/api/chat/sessions"),
            "http://localhost:8000/api/chat/sessions"
        );
    }

    #[test]
    fn test_token_roundtrip() {
        let client = RestClient::new(ClientConfig::default());
        assert!(client.token.read().unwrap().is_none());
        client.set_token("abc123");
        assert_eq!(client.token.read().unwrap().as_deref(), Some("abc123"));
        client.clear_token();
        assert!(client.token.read().unwrap().is_none());
    }

    #[test]
    fn test_prepare_attaches_bearer_token_once_set() {
        let client = RestClient::new(ClientConfig::default());
        let auth_header = |client: &RestClient| {
            client
                .prepare(client.client.get(client.url("/api/auth/me")))
                .build()
                .unwrap()
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        assert_eq!(auth_header(&client), None);

        client.set_token("abc123");
        assert_eq!(auth_header(&client), Some("Bearer abc123".to_string()));

        client.clear_token();
        assert_eq!(auth_header(&client), None);
    }

    #[test]
    fn test_error_body_decodes_fastapi_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Invalid credentials"}"#).unwrap();
        assert_eq!(body.detail, "Invalid credentials");
    }
}
