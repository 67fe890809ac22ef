pub mod api;
pub mod chat;
pub mod document;
pub mod error;
pub mod identity;
pub mod teacher;

// Re-export common error type
pub use error::{CounselError, Result};
