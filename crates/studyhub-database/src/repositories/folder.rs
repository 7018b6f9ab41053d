//! Folder repository implementation.

use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::result::AppResult;
use studyhub_core::types::{FolderId, UserId};
use studyhub_entity::folder::Folder;

use super::map_write_error;
use crate::connection::DbConnection;

const FOLDER_COLUMNS: &str = "folder_id, user_id, folder_name, created_at";

/// Message carried by the `Conflict` raised on a duplicate `(user_id, folder_name)`.
pub const DUPLICATE_FOLDER_NAME: &str = "duplicate folder name for user";

/// Repository for folder rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderRepository;

impl FolderRepository {
    /// List a user's folders, newest first.
    pub async fn list_by_user(
        &self,
        conn: &mut DbConnection,
        user_id: UserId,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE user_id = $1 \
             ORDER BY created_at DESC, folder_id DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Find a folder by ID.
    pub async fn find_by_id(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE folder_id = $1"
        ))
        .bind(folder_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Count a user's folders.
    pub async fn count_by_user(&self, conn: &mut DbConnection, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM folders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))
    }

    /// Create a new folder.
    ///
    /// The uniqueness of `(user_id, folder_name)` is left to the database; a
    /// violation surfaces as `Conflict`.
    pub async fn create(
        &self,
        conn: &mut DbConnection,
        user_id: UserId,
        folder_name: &str,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO folders (user_id, folder_name) VALUES ($1, $2) \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(folder_name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_FOLDER_NAME, "Failed to create folder"))
    }

    /// Rename a folder. Returns `None` when no such folder exists.
    pub async fn rename(
        &self,
        conn: &mut DbConnection,
        folder_id: FolderId,
        new_name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET folder_name = $1 WHERE folder_id = $2 \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(new_name)
        .bind(folder_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_FOLDER_NAME, "Failed to rename folder"))
    }

    /// Delete a folder row. Returns `true` iff a row was removed.
    pub async fn delete(&self, conn: &mut DbConnection, folder_id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE folder_id = $1")
            .bind(folder_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;

        Ok(result.rows_affected() > 0)
    }
}
