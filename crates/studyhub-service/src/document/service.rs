//! Document lifecycle manager.
//!
//! Every mutation follows the same steps: validate the parents, compute the
//! new storage path, mutate the physical file, mutate the row, and return
//! the refreshed record.

use std::sync::Arc;

use tracing::{debug, info, warn};

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::{ByteStream, StorageProvider};
use studyhub_core::types::{DocumentId, FolderId, UserId};
use studyhub_database::{DatabasePool, DocumentRepository, FolderRepository};
use studyhub_entity::document::{Document, DocumentList, NewDocument};
use studyhub_entity::folder::Folder;
use studyhub_storage::{file_extension, storage_path};

use super::lock::DocumentLocks;

/// Maximum length in characters of a new document name (without extension).
pub const MAX_DOCUMENT_NAME_LENGTH: usize = 200;

/// An upload request.
pub struct UploadDocument {
    /// The uploading user.
    pub user_id: UserId,
    /// Target folder.
    pub folder_id: FolderId,
    /// File name as sent by the client.
    pub original_filename: String,
    /// Optional replacement name; the original extension is appended.
    pub custom_name: Option<String>,
    /// File contents.
    pub stream: ByteStream,
}

impl std::fmt::Debug for UploadDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadDocument")
            .field("user_id", &self.user_id)
            .field("folder_id", &self.folder_id)
            .field("original_filename", &self.original_filename)
            .field("custom_name", &self.custom_name)
            .finish_non_exhaustive()
    }
}

/// Manages document upload, retrieval, rename, move and deletion.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Connection and transaction provider.
    db: DatabasePool,
    /// Folder store, for parent checks.
    folders: FolderRepository,
    /// Document store.
    documents: DocumentRepository,
    /// Physical file store.
    storage: Arc<dyn StorageProvider>,
    /// Per-document mutual exclusion.
    locks: DocumentLocks,
}

impl DocumentService {
    /// Creates a new document service. `locks` is shared with the folder
    /// service so a cascading folder delete waits for running mutations.
    pub fn new(db: DatabasePool, storage: Arc<dyn StorageProvider>, locks: DocumentLocks) -> Self {
        Self {
            db,
            folders: FolderRepository,
            documents: DocumentRepository,
            storage,
            locks,
        }
    }

    /// Stores an uploaded file and records it.
    ///
    /// The bytes are written before the row is inserted. If the insert
    /// fails the file is removed again.
    pub async fn upload(&self, request: UploadDocument) -> AppResult<Document> {
        let UploadDocument {
            user_id,
            folder_id,
            original_filename,
            custom_name,
            stream,
        } = request;

        self.owned_folder(folder_id, user_id).await?;

        let filename = upload_filename(&original_filename, custom_name.as_deref())?;
        let path = storage_path(user_id, folder_id, &filename);

        let bytes = self.storage.save(&path, stream).await?;
        debug!(path = %path, bytes, "Upload stored");

        let new_doc = NewDocument {
            user_id,
            folder_id,
            filename,
            storage_path: path,
            summary_text: String::new(),
        };
        let inserted = async {
            let mut conn = self.db.acquire().await?;
            self.documents.insert(&mut conn, &new_doc).await
        }
        .await;

        let doc_id = match inserted {
            Ok(Some(doc_id)) => doc_id,
            Ok(None) => {
                self.discard_file(&new_doc.storage_path).await;
                return Err(AppError::internal("Document insert returned no id"));
            }
            Err(e) => {
                self.discard_file(&new_doc.storage_path).await;
                return Err(e);
            }
        };

        let document = {
            let mut conn = self.db.acquire().await?;
            self.documents
                .find_by_id(&mut conn, doc_id)
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!("Document {doc_id} missing right after insert"))
                })?
        };

        info!(
            doc_id = %doc_id,
            user_id = %user_id,
            folder_id = %folder_id,
            filename = %document.filename,
            bytes,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Gets a document by ID.
    pub async fn get(&self, doc_id: DocumentId) -> AppResult<Document> {
        let mut conn = self.db.acquire().await?;
        self.documents
            .find_by_id(&mut conn, doc_id)
            .await?
            .ok_or_else(|| document_not_found(doc_id))
    }

    /// Lists the documents of a folder, newest first.
    pub async fn list_by_folder(&self, folder_id: FolderId) -> AppResult<DocumentList> {
        self.require_folder(folder_id).await?;

        let mut conn = self.db.acquire().await?;
        let documents = self.documents.list_by_folder(&mut conn, folder_id).await?;
        let total = self.documents.count_by_folder(&mut conn, folder_id).await?;

        Ok(DocumentList { documents, total })
    }

    /// Deletes a document: the row first, then the file, best-effort.
    pub async fn delete(&self, doc_id: DocumentId) -> AppResult<()> {
        let _guard = self.locks.acquire(doc_id).await;

        let document = self.get(doc_id).await?;
        let removed = {
            let mut conn = self.db.acquire().await?;
            self.documents.delete(&mut conn, doc_id).await?
        };
        if !removed {
            return Err(document_not_found(doc_id));
        }

        if let Err(e) = self.storage.delete(&document.storage_path).await {
            warn!(doc_id = %doc_id, path = %document.storage_path, error = %e, "Failed to remove document file");
        }

        info!(doc_id = %doc_id, path = %document.storage_path, "Document deleted");
        Ok(())
    }

    /// Renames a document, keeping its extension and folder.
    pub async fn rename(&self, doc_id: DocumentId, new_name: &str) -> AppResult<Document> {
        let new_name = validate_document_name(new_name)?;
        let _guard = self.locks.acquire(doc_id).await;

        let document = self.get(doc_id).await?;
        let new_filename = format!("{new_name}{}", file_extension(&document.filename));
        validate_filename(&new_filename)?;
        let new_path = storage_path(document.user_id, document.folder_id, &new_filename);
        let old_path = document.storage_path.clone();
        self.ensure_path_free(doc_id, &old_path, &new_path).await?;

        let moved = self.relocate(&old_path, &new_path, false).await?;

        let documents = self.documents;
        let filename = new_filename.clone();
        let path = new_path.clone();
        let updated = self
            .db
            .with_transaction(move |conn| {
                Box::pin(async move {
                    if documents
                        .update_name_and_path(conn, doc_id, &filename, &path)
                        .await?
                    {
                        Ok(())
                    } else {
                        Err(document_not_found(doc_id))
                    }
                })
            })
            .await;

        if let Err(e) = updated {
            if moved {
                self.restore_file(&new_path, &old_path).await;
            }
            return Err(e);
        }

        info!(
            doc_id = %doc_id,
            old_path = %old_path,
            new_path = %new_path,
            "Document renamed"
        );
        self.get(doc_id).await
    }

    /// Moves a document into another folder, keeping its filename.
    pub async fn move_to_folder(
        &self,
        doc_id: DocumentId,
        folder_id: FolderId,
    ) -> AppResult<Document> {
        let _guard = self.locks.acquire(doc_id).await;

        let document = self.get(doc_id).await?;
        self.owned_folder(folder_id, document.user_id).await?;

        let new_path = storage_path(document.user_id, folder_id, &document.filename);
        let old_path = document.storage_path.clone();
        self.ensure_path_free(doc_id, &old_path, &new_path).await?;

        let moved = self.relocate(&old_path, &new_path, true).await?;

        let documents = self.documents;
        let filename = document.filename.clone();
        let path = new_path.clone();
        let updated = self
            .db
            .with_transaction(move |conn| {
                Box::pin(async move {
                    if documents
                        .update_folder(conn, doc_id, folder_id, &filename, &path)
                        .await?
                    {
                        Ok(())
                    } else {
                        Err(document_not_found(doc_id))
                    }
                })
            })
            .await;

        if let Err(e) = updated {
            if moved {
                self.restore_file(&new_path, &old_path).await;
            }
            return Err(e);
        }

        info!(
            doc_id = %doc_id,
            from_folder = %document.folder_id,
            to_folder = %folder_id,
            new_path = %new_path,
            "Document moved"
        );
        self.get(doc_id).await
    }

    async fn require_folder(&self, folder_id: FolderId) -> AppResult<Folder> {
        let mut conn = self.db.acquire().await?;
        self.folders
            .find_by_id(&mut conn, folder_id)
            .await?
            .ok_or_else(|| folder_not_found(folder_id))
    }

    /// A folder of another user is reported as missing.
    async fn owned_folder(&self, folder_id: FolderId, owner: UserId) -> AppResult<Folder> {
        let folder = self.require_folder(folder_id).await?;
        if folder.user_id != owner {
            debug!(
                folder_id = %folder_id,
                owner = %folder.user_id,
                requester = %owner,
                "Folder belongs to another user"
            );
            return Err(folder_not_found(folder_id));
        }
        Ok(folder)
    }

    /// Rejects a target path that another document's row or any file
    /// already occupies.
    async fn ensure_path_free(
        &self,
        doc_id: DocumentId,
        current: &str,
        target: &str,
    ) -> AppResult<()> {
        if current == target {
            return Ok(());
        }
        let taken = {
            let mut conn = self.db.acquire().await?;
            self.documents.path_taken(&mut conn, target, doc_id).await?
        };
        if taken || self.storage.exists(target).await? {
            return Err(AppError::conflict(format!("A file already exists at {target}")));
        }
        Ok(())
    }

    /// Moves the file if it exists. Returns whether anything was moved.
    ///
    /// In move mode the destination directory is created even when the
    /// source is missing.
    async fn relocate(&self, from: &str, to: &str, create_parents: bool) -> AppResult<bool> {
        if from == to {
            return Ok(false);
        }
        let present = self.storage.exists(from).await?;
        if create_parents {
            self.storage.move_file(from, to).await?;
        } else if present {
            self.storage.rename(from, to).await?;
        }
        Ok(present)
    }

    async fn restore_file(&self, current: &str, original: &str) {
        if let Err(e) = self.storage.move_file(current, original).await {
            warn!(from = %current, to = %original, error = %e, "Failed to move file back");
        }
    }

    async fn discard_file(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(path = %path, error = %e, "Failed to remove orphaned upload");
        }
    }
}

fn document_not_found(doc_id: DocumentId) -> AppError {
    AppError::not_found(format!("Document {doc_id} not found"))
}

fn folder_not_found(folder_id: FolderId) -> AppError {
    AppError::not_found(format!("Folder {folder_id} not found"))
}

/// Final stored name of an upload: the trimmed custom name plus the
/// original extension, or the original name verbatim.
fn upload_filename(original: &str, custom_name: Option<&str>) -> AppResult<String> {
    let filename = match custom_name.map(str::trim) {
        Some(custom) if !custom.is_empty() => format!("{custom}{}", file_extension(original)),
        _ => original.to_string(),
    };
    validate_filename(&filename)?;
    Ok(filename)
}

fn validate_document_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Document name cannot be empty"));
    }
    if name.chars().count() > MAX_DOCUMENT_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Document name must be at most {MAX_DOCUMENT_NAME_LENGTH} characters"
        )));
    }
    Ok(name)
}

/// A filename must be a single, non-empty path component.
fn validate_filename(filename: &str) -> AppResult<()> {
    let unsafe_name = filename.trim().is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(AppError::validation(format!("Invalid filename: {filename:?}")));
    }
    Ok(())
}
