//! Identity types and the identity session lifecycle.
//!
//! The original client kept the current user in an ambient context. Here the
//! identity is an explicit value with a three-stage lifecycle
//! (`Unresolved -> Resolved -> Cleared`) that is passed to whoever needs it.

use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

/// An authenticated user as reported by the backend.
///
/// Immutable from the client core's perspective; only the identity
/// collaborator produces these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Display name; the backend allows this to be unset.
    pub full_name: Option<String>,
    pub role: Role,
}

impl User {
    /// The name to show in the UI: full name when present, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Lifecycle of the client's knowledge about who is signed in.
///
/// - `Unresolved`: a session restore is still in flight. Guards must render a
///   waiting state, not an error.
/// - `Resolved`: an authenticated user is known.
/// - `Cleared`: resolution finished with no user (never signed in, restore
///   failed, or signed out).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum IdentitySession {
    #[default]
    Unresolved,
    Resolved(User),
    Cleared,
}

impl IdentitySession {
    /// Returns the authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Resolved(user) => Some(user),
            _ => None,
        }
    }

    /// True while session restore has not settled yet.
    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Marks the session as belonging to `user`.
    pub fn resolve(&mut self, user: User) {
        *self = Self::Resolved(user);
    }

    /// Drops any authenticated user. Terminal until the next sign-in.
    pub fn clear(&mut self) {
        *self = Self::Cleared;
    }
}
