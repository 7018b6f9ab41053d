//! Response DTOs.

use serde::{Deserialize, Serialize};

use studyhub_core::types::UserId;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Authenticated user.
    pub user_id: UserId,
    /// Email as stored.
    pub email: String,
}

/// Root liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Always `ok`.
    pub status: String,
    /// Greeting.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unreachable`.
    pub database: String,
    /// `available` or `unavailable`.
    pub storage: String,
}
