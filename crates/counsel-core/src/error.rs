//! Error types for the Counsel client.

use thiserror::Error;

/// A shared error type for the whole client core.
///
/// Failures fall into two families: transport/API failures (the request never
/// completed, or the server rejected it) and validation failures (a client-side
/// precondition resolved before any network call). Controllers rely on the
/// distinction: validation errors are surfaced inline, network errors are
/// logged and degrade to a stale-but-available state.
#[derive(Error, Debug, Clone)]
pub enum CounselError {
    /// The server answered with a non-success status.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// The request never completed (connect, timeout, body decode).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A client-side precondition failed before any network call.
    #[error("{0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl CounselError {
    /// Creates an Api error
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// A message suitable for showing to the user.
    ///
    /// Server-reported detail is preferred; transport errors fall back to the
    /// provided generic message so raw error chains never reach the screen.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// A type alias for `Result<T, CounselError>`.
pub type Result<T> = std::result::Result<T, CounselError>;
