//! Repository implementations for all StudyHub entities.
//!
//! Repositories are stateless; each method receives the connection to run
//! on.

pub mod document;
pub mod folder;
pub mod user;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
pub use user::UserRepository;

use studyhub_core::error::{AppError, ErrorKind};

/// Map a write failure, turning a uniqueness violation into `Conflict`.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    conflict_message: &str,
    message: &str,
) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::with_source(ErrorKind::Conflict, conflict_message, err)
        }
        _ => AppError::with_source(ErrorKind::Database, message, err),
    }
}
