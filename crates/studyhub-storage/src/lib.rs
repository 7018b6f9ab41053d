//! # studyhub-storage
//!
//! The physical file store for StudyHub: a local filesystem provider
//! implementing [`studyhub_core::traits::StorageProvider`], plus the rule
//! that maps a document to its relative storage path.

pub mod path;
pub mod providers;

pub use path::{file_extension, storage_path, user_folder_dir, STORAGE_PREFIX};
pub use providers::local::LocalStorageProvider;
