//! # studyhub-auth
//!
//! Credential handling for StudyHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and the password policy
//! - `authenticator`: email + password verification against the user store

pub mod authenticator;
pub mod password;

pub use authenticator::{Authenticator, INVALID_CREDENTIALS};
pub use password::{PasswordHasher, PasswordValidator};
