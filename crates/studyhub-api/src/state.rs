//! Shared application state passed to every handler.

use std::sync::Arc;

use studyhub_auth::Authenticator;
use studyhub_core::config::AppConfig;
use studyhub_core::traits::StorageProvider;
use studyhub_database::DatabasePool;
use studyhub_service::{DocumentLocks, DocumentService, FolderService};

/// Application state injected through Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Database connection pool.
    pub db: DatabasePool,
    /// Physical file store.
    pub storage: Arc<dyn StorageProvider>,
    /// Folder lifecycle manager.
    pub folder_service: Arc<FolderService>,
    /// Document lifecycle manager.
    pub document_service: Arc<DocumentService>,
    /// Credential check.
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Wires the services on top of a pool and a storage provider.
    pub fn new(config: AppConfig, db: DatabasePool, storage: Arc<dyn StorageProvider>) -> Self {
        let locks = DocumentLocks::new();
        let folder_service = Arc::new(FolderService::new(
            db.clone(),
            Arc::clone(&storage),
            locks.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(
            db.clone(),
            Arc::clone(&storage),
            locks,
        ));
        let authenticator = Arc::new(Authenticator::new(db.clone()));

        Self {
            config: Arc::new(config),
            db,
            storage,
            folder_service,
            document_service,
            authenticator,
        }
    }
}
