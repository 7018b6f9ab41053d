//! Auth handlers.

use axum::Json;
use axum::extract::State;

use studyhub_core::error::AppError;
use studyhub_database::UserRepository;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let user_id = state
        .authenticator
        .authenticate(&req.email, &req.password)
        .await?;

    let mut conn = state.db.acquire().await?;
    let user = UserRepository
        .find_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("User {user_id} vanished after login")))?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        user_id: user.user_id,
        email: user.email,
    })))
}
