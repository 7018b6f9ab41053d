//! Folder lifecycle manager.

use std::sync::Arc;

use tracing::{info, warn};

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::StorageProvider;
use studyhub_core::types::{FolderId, UserId};
use studyhub_database::{DatabasePool, DbConnection, DocumentRepository, FolderRepository};
use studyhub_entity::folder::{Folder, FolderList};
use studyhub_storage::user_folder_dir;

use crate::document::DocumentLocks;

/// Maximum folder name length in characters.
pub const MAX_FOLDER_NAME_LENGTH: usize = 100;

/// Manages folder creation, renaming, listing and cascading deletion.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Connection and transaction provider.
    db: DatabasePool,
    /// Folder store.
    folders: FolderRepository,
    /// Document store, for counts and cascade deletion.
    documents: DocumentRepository,
    /// Physical file store.
    storage: Arc<dyn StorageProvider>,
    /// Per-document locks, shared with the document service.
    locks: DocumentLocks,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(db: DatabasePool, storage: Arc<dyn StorageProvider>, locks: DocumentLocks) -> Self {
        Self {
            db,
            folders: FolderRepository,
            documents: DocumentRepository,
            storage,
            locks,
        }
    }

    /// Lists a user's folders, newest first, each with its document count.
    pub async fn list_for_user(&self, user_id: UserId) -> AppResult<FolderList> {
        let mut conn = self.db.acquire().await?;
        let folders = self.folders.list_by_user(&mut conn, user_id).await?;

        let mut counted = Vec::with_capacity(folders.len());
        for folder in folders {
            counted.push(self.with_count(&mut conn, folder).await?);
        }
        let total = self.folders.count_by_user(&mut conn, user_id).await?;

        Ok(FolderList {
            folders: counted,
            total,
        })
    }

    /// Gets a folder by ID.
    pub async fn get_by_id(&self, folder_id: FolderId) -> AppResult<Folder> {
        let mut conn = self.db.acquire().await?;
        let folder = self
            .folders
            .find_by_id(&mut conn, folder_id)
            .await?
            .ok_or_else(|| folder_not_found(folder_id))?;
        self.with_count(&mut conn, folder).await
    }

    /// Creates a folder. A name the user already uses is a `Conflict`.
    pub async fn create(&self, user_id: UserId, folder_name: &str) -> AppResult<Folder> {
        let name = validate_folder_name(folder_name)?;
        let folders = self.folders;

        let folder = self
            .db
            .with_transaction(move |conn| {
                Box::pin(async move { folders.create(conn, user_id, &name).await })
            })
            .await?;

        info!(
            folder_id = %folder.folder_id,
            user_id = %user_id,
            name = %folder.folder_name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename(&self, folder_id: FolderId, new_name: &str) -> AppResult<Folder> {
        let name = validate_folder_name(new_name)?;
        let folders = self.folders;

        let folder = self
            .db
            .with_transaction(move |conn| {
                Box::pin(async move {
                    folders
                        .rename(conn, folder_id, &name)
                        .await?
                        .ok_or_else(|| folder_not_found(folder_id))
                })
            })
            .await?;

        info!(folder_id = %folder_id, name = %folder.folder_name, "Folder renamed");

        let mut conn = self.db.acquire().await?;
        self.with_count(&mut conn, folder).await
    }

    /// Deletes a folder together with its documents.
    ///
    /// Document rows and the folder row are removed in one transaction.
    /// The files and the folder's directory are removed afterwards,
    /// best-effort. The locks of the folder's documents are held
    /// throughout, so a running rename or move finishes first.
    pub async fn remove(&self, folder_id: FolderId) -> AppResult<()> {
        let (folder, doc_ids) = {
            let mut conn = self.db.acquire().await?;
            let folder = self
                .folders
                .find_by_id(&mut conn, folder_id)
                .await?
                .ok_or_else(|| folder_not_found(folder_id))?;
            let doc_ids = self.documents.ids_by_folder(&mut conn, folder_id).await?;
            (folder, doc_ids)
        };

        // Ascending order, so two removals of one folder cannot deadlock.
        let mut guards = Vec::with_capacity(doc_ids.len());
        for doc_id in doc_ids {
            guards.push(self.locks.acquire(doc_id).await);
        }

        let folders = self.folders;
        let documents = self.documents;
        let paths = self
            .db
            .with_transaction(move |conn| {
                Box::pin(async move {
                    let paths = documents.delete_by_folder(conn, folder_id).await?;
                    if !folders.delete(conn, folder_id).await? {
                        return Err(folder_not_found(folder_id));
                    }
                    Ok(paths)
                })
            })
            .await?;

        for path in &paths {
            if let Err(e) = self.storage.delete(path).await {
                warn!(folder_id = %folder_id, path = %path, error = %e, "Failed to remove document file");
            }
        }
        let dir = user_folder_dir(folder.user_id, folder_id);
        if let Err(e) = self.storage.delete_dir(&dir).await {
            warn!(folder_id = %folder_id, dir = %dir, error = %e, "Failed to remove folder directory");
        }
        drop(guards);

        info!(
            folder_id = %folder_id,
            user_id = %folder.user_id,
            documents = paths.len(),
            "Folder deleted"
        );
        Ok(())
    }

    async fn with_count(&self, conn: &mut DbConnection, folder: Folder) -> AppResult<Folder> {
        let count = self
            .documents
            .count_by_folder(conn, folder.folder_id)
            .await?;
        Ok(folder.with_document_count(count))
    }
}

fn folder_not_found(folder_id: FolderId) -> AppError {
    AppError::not_found(format!("Folder {folder_id} not found"))
}

fn validate_folder_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Folder name must be at most {MAX_FOLDER_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}
