//! # studyhub-api
//!
//! HTTP API layer for StudyHub built on Axum.
//!
//! Provides the REST endpoints for login, folders and documents, the
//! CORS and request-logging middleware, validating extractors, DTOs and
//! the mapping from [`AppError`](studyhub_core::AppError) to HTTP status.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
