//! Folder handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use studyhub_core::types::{FolderId, UserId};
use studyhub_entity::folder::{Folder, FolderList};

use crate::dto::request::{CreateFolderRequest, RenameFolderRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{IdPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/folders/user/{user_id}
pub async fn list_user_folders(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<ApiResponse<FolderList>>> {
    let folders = state.folder_service.list_for_user(user_id).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/v1/folders/{folder_id}
pub async fn get_folder(
    State(state): State<AppState>,
    IdPath(folder_id): IdPath<FolderId>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.get_by_id(folder_id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let folder = state
        .folder_service
        .create(req.user_id, &req.folder_name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PATCH /api/v1/folders/{folder_id}/name
pub async fn rename_folder(
    State(state): State<AppState>,
    IdPath(folder_id): IdPath<FolderId>,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state
        .folder_service
        .rename(folder_id, &req.new_name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/v1/folders/{folder_id}
pub async fn delete_folder(
    State(state): State<AppState>,
    IdPath(folder_id): IdPath<FolderId>,
) -> ApiResult<StatusCode> {
    state.folder_service.remove(folder_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
