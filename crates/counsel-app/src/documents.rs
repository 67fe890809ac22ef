//! Reference document list and single-flight upload.

use counsel_core::api::DocumentApi;
use counsel_core::document::Document;
use std::sync::Arc;

/// Extension the backend indexes. The check is case-sensitive on purpose:
/// it mirrors what the server accepts.
pub const ACCEPTED_EXTENSION: &str = ".pdf";

/// Outcome of the most recent upload attempt, for the UI to show.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadNotice {
    /// The document was stored and the list refreshed.
    Uploaded,
    /// Rejected client-side before any network call.
    Rejected(String),
    /// The request failed; carries the server detail or a generic message.
    Failed(String),
}

/// Owns the uploaded-document list and the upload lock.
///
/// Uploads are single-flight: one at a time, globally for this controller,
/// regardless of which document. The lock clears however the request
/// settles, and the pending file selection is reset so the same file can be
/// picked again immediately.
pub struct DocumentRepositoryController {
    api: Arc<dyn DocumentApi>,
    documents: Vec<Document>,
    uploading: bool,
    /// Filename currently sitting in the upload control, if any.
    selection: Option<String>,
    notice: Option<UploadNotice>,
}

impl DocumentRepositoryController {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            documents: Vec::new(),
            uploading: false,
            selection: None,
            notice: None,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Feedback from the last upload attempt; cleared by the next attempt.
    pub fn notice(&self) -> Option<&UploadNotice> {
        self.notice.as_ref()
    }

    /// Fetches and replaces the document list. Failures are logged and keep
    /// the stale list.
    pub async fn load_documents(&mut self) {
        match self.api.list_documents().await {
            Ok(documents) => self.documents = documents,
            Err(e) => tracing::warn!("failed to load documents: {}", e),
        }
    }

    /// Uploads a document.
    ///
    /// A filename without the accepted extension is rejected before any
    /// network call. While an upload is in flight further calls are no-ops.
    /// On success the list is refreshed from the server; on failure the
    /// server-reported detail is surfaced, with a generic fallback.
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) {
        if self.uploading {
            return;
        }
        self.notice = None;

        if !filename.ends_with(ACCEPTED_EXTENSION) {
            self.notice = Some(UploadNotice::Rejected(format!(
                "Only {} files are accepted",
                ACCEPTED_EXTENSION
            )));
            return;
        }

        self.selection = Some(filename.to_string());
        self.uploading = true;

        match self.api.upload(filename, bytes).await {
            Ok(_) => {
                self.notice = Some(UploadNotice::Uploaded);
                self.load_documents().await;
            }
            Err(e) => {
                tracing::warn!(filename, "document upload failed: {}", e);
                self.notice = Some(UploadNotice::Failed(
                    e.user_message("Upload failed: unknown error"),
                ));
            }
        }
        self.uploading = false;
        // Reset the control so the same file can be re-selected.
        self.selection = None;
    }
}
