//! Application builder: wires router, middleware and state into an Axum app.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;

use studyhub_core::config::AppConfig;
use studyhub_core::error::{AppError, ErrorKind};
use studyhub_core::traits::StorageProvider;
use studyhub_database::DatabasePool;
use studyhub_storage::LocalStorageProvider;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the StudyHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let storage = LocalStorageProvider::new(&config.storage.root_path).await?;
    tracing::info!(root = %storage.root().display(), "Local storage ready");
    let storage: Arc<dyn StorageProvider> = Arc::new(storage);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, db.clone(), storage);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(%addr, "StudyHub server listening");

    let (started_tx, started_rx) = oneshot::channel();
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = started_tx.send(());
        })
        .into_future();

    let drained = serve_with_grace(serve, started_rx, grace)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;
    if !drained {
        tracing::warn!(
            grace_seconds = grace.as_secs(),
            "Graceful shutdown timed out, dropping open connections"
        );
    }

    tracing::info!("Server stopped, closing database pool");
    db.close().await;
    Ok(())
}

/// Drives the server future. Once shutdown has started, open requests get
/// `grace` to finish. Returns `false` if the grace period ran out.
async fn serve_with_grace<F>(
    serve: F,
    shutdown_started: oneshot::Receiver<()>,
    grace: Duration,
) -> std::io::Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(serve);
    tokio::select! {
        result = &mut serve => result.map(|()| true),
        _ = shutdown_started => match tokio::time::timeout(grace, &mut serve).await {
            Ok(result) => result.map(|()| true),
            Err(_) => Ok(false),
        },
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
