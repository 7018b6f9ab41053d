//! Route handlers organized by domain.

pub mod auth;
pub mod document;
pub mod folder;
pub mod health;
