//! Document handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;

use studyhub_core::error::AppError;
use studyhub_core::traits::ByteStream;
use studyhub_core::types::{DocumentId, FolderId, UserId};
use studyhub_entity::document::{Document, DocumentList};
use studyhub_service::UploadDocument;

use crate::dto::request::{MoveDocumentRequest, RenameDocumentRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/documents/upload
///
/// Multipart fields: `file`, `user_id`, `folder_id` and an optional
/// `filename` that replaces the uploaded name (extension kept).
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<Document>>)> {
    let mut user_id: Option<UserId> = None;
    let mut folder_id: Option<FolderId> = None;
    let mut custom_name: Option<String> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "user_id" => {
                let text = read_text(field).await?;
                user_id = Some(
                    text.parse()
                        .map_err(|_| AppError::validation("Invalid user_id"))?,
                );
            }
            "folder_id" => {
                let text = read_text(field).await?;
                folder_id = Some(
                    text.parse()
                        .map_err(|_| AppError::validation("Invalid folder_id"))?,
                );
            }
            "filename" => {
                let text = read_text(field).await?;
                if !text.trim().is_empty() {
                    custom_name = Some(text);
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                file = Some((file_name, data));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::validation("user_id is required"))?;
    let folder_id = folder_id.ok_or_else(|| AppError::validation("folder_id is required"))?;
    let (original_filename, data) =
        file.ok_or_else(|| AppError::validation("file is required"))?;

    let stream: ByteStream = Box::pin(futures::stream::once(async move {
        Ok::<Bytes, std::io::Error>(data)
    }));

    let document = state
        .document_service
        .upload(UploadDocument {
            user_id,
            folder_id,
            original_filename,
            custom_name,
            stream,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/v1/documents/folder/{folder_id}
pub async fn list_folder_documents(
    State(state): State<AppState>,
    IdPath(folder_id): IdPath<FolderId>,
) -> ApiResult<Json<ApiResponse<DocumentList>>> {
    let documents = state.document_service.list_by_folder(folder_id).await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// GET /api/v1/documents/{doc_id}
pub async fn get_document(
    State(state): State<AppState>,
    IdPath(doc_id): IdPath<DocumentId>,
) -> ApiResult<Json<ApiResponse<Document>>> {
    let document = state.document_service.get(doc_id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// DELETE /api/v1/documents/{doc_id}
pub async fn delete_document(
    State(state): State<AppState>,
    IdPath(doc_id): IdPath<DocumentId>,
) -> ApiResult<StatusCode> {
    state.document_service.delete(doc_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/documents/{doc_id}/rename
pub async fn rename_document(
    State(state): State<AppState>,
    IdPath(doc_id): IdPath<DocumentId>,
    ValidatedJson(req): ValidatedJson<RenameDocumentRequest>,
) -> ApiResult<Json<ApiResponse<Document>>> {
    let document = state
        .document_service
        .rename(doc_id, &req.new_name)
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// PATCH /api/v1/documents/{doc_id}/move
pub async fn move_document(
    State(state): State<AppState>,
    IdPath(doc_id): IdPath<DocumentId>,
    ValidatedJson(req): ValidatedJson<MoveDocumentRequest>,
) -> ApiResult<Json<ApiResponse<Document>>> {
    let document = state
        .document_service
        .move_to_folder(doc_id, req.new_folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(document)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}
