//! # studyhub-core
//!
//! Core crate for StudyHub. Contains the unified error system, configuration
//! schemas, typed identifiers, and the storage provider trait implemented by
//! `studyhub-storage`.
//!
//! This crate has **no** internal dependencies on other StudyHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
