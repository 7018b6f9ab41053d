//! # studyhub-entity
//!
//! Domain entity models for StudyHub. Every struct in this crate
//! represents a database table row or a list aggregate returned by the
//! lifecycle managers. Row types derive `sqlx::FromRow` and work on both
//! supported database backends.

pub mod document;
pub mod folder;
pub mod user;
