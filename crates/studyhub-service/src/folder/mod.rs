//! Folder lifecycle management.

pub mod service;

pub use service::{FolderService, MAX_FOLDER_NAME_LENGTH};
