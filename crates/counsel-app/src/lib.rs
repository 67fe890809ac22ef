//! Application layer: the controllers that drive the counseling client.
//!
//! Each controller exclusively owns its state and suspends only at network
//! boundaries (the API seams from `counsel-core`). There is no cross-
//! controller shared mutation; the send lock and the upload lock are plain
//! per-controller flags.

pub mod access_guard;
pub mod auth;
pub mod conversation;
pub mod dashboard;
pub mod documents;
pub mod roster;
pub mod session_store;

#[cfg(test)]
pub(crate) mod testing;

pub use access_guard::{AccessDecision, AccessGuard, Route};
pub use auth::{AuthController, RegistrationForm, TokenSink};
pub use conversation::ConversationController;
pub use dashboard::{DashboardTab, TeacherDashboard};
pub use documents::{DocumentRepositoryController, UploadNotice};
pub use roster::{RosterView, TeacherRosterController};
pub use session_store::{ConfirmPrompt, SessionStore};
