//! Teacher-side read models.

use crate::chat::Session;
use serde::{Deserialize, Serialize};

/// One student as seen from the teacher dashboard: identity fields plus the
/// student's sessions, embedded by the roster endpoint so no second fetch is
/// needed to show the session list.
///
/// Read-only projection; nothing on the teacher side ever writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub user_id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl StudentRecord {
    /// The name to show in the roster: full name when present, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}
