//! Database migration runner.

use tracing::info;

use studyhub_core::error::{AppError, ErrorKind};

use crate::connection::DbPool;

/// Run all pending database migrations for the compiled-in backend.
pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    #[cfg(feature = "postgres")]
    let migrator = sqlx::migrate!("../../migrations/postgres");
    #[cfg(not(feature = "postgres"))]
    let migrator = sqlx::migrate!("../../migrations/sqlite");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}
