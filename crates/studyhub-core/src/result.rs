//! Convenience result type alias for StudyHub.

use crate::error::AppError;

/// A specialized `Result` type for StudyHub operations.
pub type AppResult<T> = Result<T, AppError>;
