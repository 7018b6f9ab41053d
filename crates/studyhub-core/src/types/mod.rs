//! Core type definitions used across the StudyHub workspace.

pub mod id;

pub use id::*;
