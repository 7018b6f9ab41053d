//! Document lifecycle management.

pub mod lock;
pub mod service;

pub use lock::{DocumentLockGuard, DocumentLocks};
pub use service::{DocumentService, MAX_DOCUMENT_NAME_LENGTH, UploadDocument};
