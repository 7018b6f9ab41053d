//! Document repository implementation.

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_core::types::{DocumentId, FolderId};
use studyhub_entity::document::{Document, NewDocument};

use crate::connection::DbConnection;

const DOCUMENT_COLUMNS: &str =
    "doc_id, user_id, folder_id, filename, storage_path, summary_text, created_at";

/// Repository for document metadata rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRepository;

impl DocumentRepository {
    /// Insert a document row and return its generated id, if the database
    /// reported one.
    pub async fn insert(
        &self,
        conn: &mut DbConnection,
        data: &NewDocument,
    ) -> AppResult<Option<DocumentId>> {
        sqlx::query_scalar::<_, DocumentId>(
            "INSERT INTO documents (user_id, folder_id, filename, storage_path, summary_text) \
             VALUES ($1, $2, $3, $4, $5) RETURNING doc_id",
        )
        .bind(data.user_id)
        .bind(data.folder_id)
        .bind(&data.filename)
        .bind(&data.storage_path)
        .bind(&data.summary_text)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert document", e))
    }

    /// Find a document by ID.
    pub async fn find_by_id(
        &self,
        conn: &mut DbConnection,
        doc_id: DocumentId,
    ) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE doc_id = $1"
        ))
        .bind(doc_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List the documents of a folder, newest first.
    pub async fn list_by_folder(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
    ) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE folder_id = $1 \
             ORDER BY created_at DESC, doc_id DESC"
        ))
        .bind(folder_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// Count the documents of a folder.
    pub async fn count_by_folder(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })
    }

    /// IDs of the documents in a folder, ascending.
    pub async fn ids_by_folder(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
    ) -> AppResult<Vec<DocumentId>> {
        sqlx::query_scalar::<_, DocumentId>(
            "SELECT doc_id FROM documents WHERE folder_id = $1 ORDER BY doc_id",
        )
        .bind(folder_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list document ids", e))
    }

    /// Whether a document other than `except` is stored at `storage_path`.
    pub async fn path_taken(
        &self,
        conn: &mut DbConnection,
        storage_path: &str,
        except: DocumentId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE storage_path = $1 AND doc_id <> $2",
        )
        .bind(storage_path)
        .bind(except)
        .fetch_one(&mut *conn)
        .await
        .map(|count| count > 0)
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check storage path", e)
        })
    }

    /// Delete a document row. Returns `true` iff a row was removed.
    pub async fn delete(&self, conn: &mut DbConnection, doc_id: DocumentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE doc_id = $1")
            .bind(doc_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every document row of a folder, returning the storage paths
    /// of the removed rows.
    pub async fn delete_by_folder(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM documents WHERE folder_id = $1 RETURNING storage_path",
        )
        .bind(folder_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete folder documents", e)
        })
    }

    /// Update the filename and storage path of a document.
    pub async fn update_name_and_path(
        &self,
        conn: &mut DbConnection,
        doc_id: DocumentId,
        filename: &str,
        storage_path: &str,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE documents SET filename = $1, storage_path = $2 WHERE doc_id = $3")
                .bind(filename)
                .bind(storage_path)
                .bind(doc_id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to rename document", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Re-parent a document, updating its filename and storage path.
    pub async fn update_folder(
        &self,
        conn: &mut DbConnection,
        doc_id: DocumentId,
        folder_id: FolderId,
        filename: &str,
        storage_path: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET folder_id = $1, filename = $2, storage_path = $3 \
             WHERE doc_id = $4",
        )
        .bind(folder_id)
        .bind(filename)
        .bind(storage_path)
        .bind(doc_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move document", e))?;

        Ok(result.rows_affected() > 0)
    }
}
