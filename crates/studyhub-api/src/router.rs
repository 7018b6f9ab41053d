//! Route definitions for the StudyHub HTTP API.
//!
//! Domain routes are mounted under `/api/v1`; liveness routes sit at the
//! root.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the body limit.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(document_routes());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login))
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route(
            "/folders/user/{user_id}",
            get(handlers::folder::list_user_folders),
        )
        .route(
            "/folders/{folder_id}",
            get(handlers::folder::get_folder).delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/{folder_id}/name",
            patch(handlers::folder::rename_folder),
        )
}

fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/upload",
            post(handlers::document::upload_document),
        )
        .route(
            "/documents/folder/{folder_id}",
            get(handlers::document::list_folder_documents),
        )
        .route(
            "/documents/{doc_id}",
            get(handlers::document::get_document).delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{doc_id}/rename",
            patch(handlers::document::rename_document),
        )
        .route(
            "/documents/{doc_id}/move",
            patch(handlers::document::move_document),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
}
