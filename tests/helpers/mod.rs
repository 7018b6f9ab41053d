//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use studyhub_api::{AppState, build_app};
use studyhub_auth::PasswordHasher;
use studyhub_core::config::{AppConfig, DatabaseConfig};
use studyhub_core::traits::StorageProvider;
use studyhub_database::{DatabasePool, UserRepository, run_migrations};
use studyhub_storage::LocalStorageProvider;

const BOUNDARY: &str = "studyhub-test-boundary";

/// Test application context backed by a temporary SQLite file.
pub struct TestApp {
    /// The Axum app for making test requests.
    pub router: Router,
    /// Pool for direct setup.
    pub db: DatabasePool,
    /// Storage root on disk.
    pub root: PathBuf,
    _dir: TempDir,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty).
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let url = format!("sqlite://{}/studyhub.db?mode=rwc", dir.path().display());
        let database = DatabaseConfig::with_url(url);

        let db = DatabasePool::connect(&database).await.expect("connect");
        run_migrations(db.pool()).await.expect("migrations");

        let root = dir.path().join("files");
        let root_str = root.to_str().expect("utf-8 path").to_string();
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&root_str)
                .await
                .expect("storage"),
        );

        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": database.url },
            "storage": { "root_path": root_str },
        }))
        .expect("config");

        let state = AppState::new(config, db.clone(), storage);

        Self {
            router: build_app(state),
            db,
            root,
            _dir: dir,
        }
    }

    /// Create a user with a real argon2 hash and return their id.
    pub async fn create_user(&self, email: &str, password: &str) -> i64 {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("hash");
        let mut conn = self.db.acquire().await.expect("acquire");
        UserRepository
            .create(&mut conn, email, &hash)
            .await
            .expect("create user")
            .user_id
            .get()
    }

    /// Create a folder through the API and return its id.
    pub async fn create_folder(&self, user_id: i64, name: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/v1/folders",
                Some(serde_json::json!({ "user_id": user_id, "folder_name": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["folder_id"].as_i64().expect("folder_id")
    }

    /// Make a JSON request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("build request");

        self.send(req).await
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(
        &self,
        user_id: i64,
        folder_id: i64,
        filename: &str,
        custom_name: Option<&str>,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        let mut text_field = |name: &str, value: &str| {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        };
        text_field("user_id", &user_id.to_string());
        text_field("folder_id", &folder_id.to_string());
        if let Some(custom) = custom_name {
            text_field("filename", custom);
        }

        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/documents/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("build request");

        self.send(req).await
    }

    /// Whether a storage path exists below the storage root.
    pub fn file_exists(&self, storage_path: &str) -> bool {
        self.root.join(storage_path).exists()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
