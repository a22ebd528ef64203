//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::services::{MappingService, UploadService};
use crate::config::Config;
use crate::infrastructure::persistence::SqliteUrlMapRepository;
use crate::infrastructure::remote_storage::{RemoteStorage, YandexDiskStorage};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (the database file is created if missing)
/// - Migrations
/// - Mapping and upload services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(connect_options)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let repository = Arc::new(SqliteUrlMapRepository::new(Arc::new(pool)));
    let mappings = Arc::new(MappingService::new(
        repository,
        config.base_url.clone(),
        config.short_ids.clone(),
    ));

    let uploads = match &config.disk_token {
        Some(token) => {
            tracing::info!("File uploads enabled");
            let storage: Arc<dyn RemoteStorage> = Arc::new(YandexDiskStorage::new(token)?);
            Some(Arc::new(UploadService::new(Arc::clone(&mappings), storage)))
        }
        None => {
            tracing::info!("File uploads disabled (no DISK_TOKEN)");
            None
        }
    };

    let state = AppState::new(mappings, uploads);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Completes when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
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
