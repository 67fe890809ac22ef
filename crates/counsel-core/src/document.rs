//! Reference document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded reference document.
///
/// The document list is append-only: documents are created and listed, never
/// updated through this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}
