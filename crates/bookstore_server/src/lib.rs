//! Process wiring for the bookstore service.
//!
//! # Responsibility
//! - Turn an `AppConfig` into a running HTTP server.
//! - Create and seed catalog tables before the first request is accepted.
//!
//! # Invariants
//! - Logging is initialized before any other startup step.
//! - The listener is only bound once the database is ready.

pub mod config;

use crate::config::AppConfig;
use anyhow::Context;
use bookstore_api::{ApiState, DOCS_PATH};
use bookstore_core::{initialize, open_db, InitReport, SeedData};
use log::{info, warn};
use std::path::Path;
use tokio::net::TcpListener;

/// Creates missing catalog tables at `path` and seeds the ones it created.
///
/// # Errors
/// Fails when the database cannot be opened or a table cannot be created.
pub fn prepare_database(path: &Path, seed: &SeedData) -> anyhow::Result<InitReport> {
    let mut conn = open_db(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    let report = initialize(&mut conn, seed).context("failed to initialize catalog tables")?;
    info!(
        "event=db_ready module=server status=ok path={} created_tables={} seeded_authors={} seeded_books={}",
        path.display(),
        report.created_any(),
        report.seeded_authors,
        report.seeded_books
    );
    Ok(report)
}

/// Runs the server until ctrl-c or SIGTERM.
///
/// # Errors
/// Fails when logging, database setup, or binding the listener fails.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    bookstore_core::init_logging(&config.logging.level, config.logging.dir.as_deref())
        .context("failed to initialize logging")?;
    let source = match config.source.as_deref() {
        Some(path) => path.display().to_string(),
        None => "defaults+env".to_string(),
    };
    info!(
        "event=config_load module=server status=ok source={} db_path={}",
        source,
        config.database.path.display()
    );

    let db_path = config.database.path.clone();
    prepare_database(&db_path, &config.seed)?;

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        "event=server_start module=server status=ok addr={} docs={} version={}",
        addr,
        DOCS_PATH,
        bookstore_core::core_version()
    );

    let app = bookstore_api::router(ApiState::new(db_path));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_listen module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("event=signal_listen module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=server_shutdown module=server status=start");
}
