//! Chat domain: sessions and messages.

pub mod message;
pub mod session;

pub use message::{DeliveryStatus, Message, MessageRole};
pub use session::{Session, SessionSummary};
