//! Temporary SQLite databases for repository tests.

use tempfile::TempDir;

use studyhub_core::config::DatabaseConfig;
use studyhub_core::types::UserId;

use crate::connection::{DatabasePool, PooledConnection};
use crate::migration::run_migrations;
use crate::repositories::UserRepository;

pub(crate) struct TestDb {
    pub pool: DatabasePool,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
        let pool = DatabasePool::connect(&DatabaseConfig::with_url(url))
            .await
            .expect("connect");
        run_migrations(pool.pool()).await.expect("migrations");
        Self { pool, _dir: dir }
    }

    pub async fn conn(&self) -> PooledConnection {
        self.pool.acquire().await.expect("acquire")
    }

    pub async fn user(&self, email: &str) -> UserId {
        let mut conn = self.conn().await;
        UserRepository
            .create(&mut conn, email, "hash")
            .await
            .expect("create user")
            .user_id
    }
}
