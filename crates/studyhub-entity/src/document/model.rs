//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use studyhub_core::types::{DocumentId, FolderId, UserId};

/// Metadata describing an uploaded file and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub doc_id: DocumentId,
    /// The owning user.
    pub user_id: UserId,
    /// The folder containing this document.
    pub folder_id: FolderId,
    /// The file name (including extension).
    pub filename: String,
    /// Relative path inside the file store,
    /// always `pdf_files/{user_id}/{folder_id}/{filename}`.
    pub storage_path: String,
    /// Extracted summary text (empty until populated).
    pub summary_text: String,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// The file extension including the leading dot, or `""`.
    pub fn extension(&self) -> &str {
        match self.filename.rfind('.') {
            Some(0) | None => "",
            Some(idx) => &self.filename[idx..],
        }
    }
}

/// Data required to insert a new document row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// The owning user.
    pub user_id: UserId,
    /// The target folder.
    pub folder_id: FolderId,
    /// Final stored file name.
    pub filename: String,
    /// Relative storage path.
    pub storage_path: String,
    /// Summary text, usually empty.
    #[serde(default)]
    pub summary_text: String,
}

/// The documents of one folder with the independently counted total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    /// Documents, newest first.
    pub documents: Vec<Document>,
    /// Number of documents in the folder.
    pub total: i64,
}
