//! Shared test helpers for lifecycle-manager integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use studyhub_core::config::DatabaseConfig;
use studyhub_core::traits::{ByteStream, StorageProvider};
use studyhub_core::types::{FolderId, UserId};
use studyhub_database::{DatabasePool, UserRepository, run_migrations};
use studyhub_entity::document::Document;
use studyhub_service::{DocumentLocks, DocumentService, FolderService, UploadDocument};
use studyhub_storage::LocalStorageProvider;

/// A fresh SQLite database and file store rooted in a temporary directory.
pub struct TestEnv {
    pub db: DatabasePool,
    pub storage: Arc<LocalStorageProvider>,
    pub folders: FolderService,
    pub documents: DocumentService,
    pub locks: DocumentLocks,
    _dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let url = format!("sqlite://{}/studyhub.db?mode=rwc", dir.path().display());
        let db = DatabasePool::connect(&DatabaseConfig::with_url(url))
            .await
            .expect("connect");
        run_migrations(db.pool()).await.expect("migrations");

        let root = dir.path().join("files");
        let storage = Arc::new(
            LocalStorageProvider::new(root.to_str().expect("utf-8 path"))
                .await
                .expect("storage"),
        );
        let provider: Arc<dyn StorageProvider> = storage.clone();
        let locks = DocumentLocks::new();

        Self {
            folders: FolderService::new(db.clone(), Arc::clone(&provider), locks.clone()),
            documents: DocumentService::new(db.clone(), provider, locks.clone()),
            locks,
            db,
            storage,
            _dir: dir,
        }
    }

    pub async fn user(&self, email: &str) -> UserId {
        self.user_with_hash(email, "unused-hash").await
    }

    pub async fn user_with_hash(&self, email: &str, hash: &str) -> UserId {
        let mut conn = self.db.acquire().await.expect("acquire");
        UserRepository
            .create(&mut conn, email, hash)
            .await
            .expect("create user")
            .user_id
    }

    pub async fn folder(&self, user_id: UserId, name: &str) -> FolderId {
        self.folders
            .create(user_id, name)
            .await
            .expect("create folder")
            .folder_id
    }

    pub async fn upload(
        &self,
        user_id: UserId,
        folder_id: FolderId,
        filename: &str,
        custom_name: Option<&str>,
        content: &'static [u8],
    ) -> Document {
        self.documents
            .upload(UploadDocument {
                user_id,
                folder_id,
                original_filename: filename.to_string(),
                custom_name: custom_name.map(str::to_string),
                stream: bytes_stream(content),
            })
            .await
            .expect("upload")
    }

    pub async fn file_exists(&self, path: &str) -> bool {
        self.storage.exists(path).await.expect("exists")
    }

    pub async fn read(&self, path: &str) -> Bytes {
        self.storage.read_bytes(path).await.expect("read")
    }

    pub async fn execute(&self, sql: &str) {
        sqlx::query(sql)
            .execute(self.db.pool())
            .await
            .expect("raw statement");
    }
}

pub fn bytes_stream(content: &'static [u8]) -> ByteStream {
    Box::pin(futures::stream::iter(vec![Ok::<_, std::io::Error>(
        Bytes::from_static(content),
    )]))
}
