//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use studyhub_core::types::{FolderId, UserId};

/// A named per-user grouping of documents.
///
/// `(user_id, folder_name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub folder_id: FolderId,
    /// The owning user.
    pub user_id: UserId,
    /// Folder name, unique per user.
    pub folder_name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// Number of documents in the folder. Never persisted; filled in by
    /// the folder lifecycle manager on every read.
    #[sqlx(default)]
    #[serde(default)]
    pub document_count: i64,
}

impl Folder {
    /// Attach a freshly counted number of documents.
    pub fn with_document_count(mut self, count: i64) -> Self {
        self.document_count = count;
        self
    }
}

/// A user's folders together with the total folder count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderList {
    /// Folders, newest first.
    pub folders: Vec<Folder>,
    /// Total number of folders owned by the user.
    pub total: i64,
}
