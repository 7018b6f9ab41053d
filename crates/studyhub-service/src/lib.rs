//! # studyhub-service
//!
//! Lifecycle managers for StudyHub. Each manager keeps the relational
//! metadata and the physical file store consistent across create, rename,
//! move and delete, without a distributed transaction:
//!
//! - creation writes the file first, then the row, and removes the file if
//!   the row cannot be written;
//! - deletion removes the row first, then the file, best-effort;
//! - rename and move relocate the file, update the row in a transaction,
//!   and move the file back if the update fails.
//!
//! A crash between the two steps can still leave an orphan file or a row
//! pointing at a missing file.
//!
//! Services follow constructor injection; the file store is shared as an
//! `Arc<dyn StorageProvider>`.

pub mod document;
pub mod folder;

pub use document::{DocumentLocks, DocumentService, UploadDocument};
pub use folder::FolderService;
