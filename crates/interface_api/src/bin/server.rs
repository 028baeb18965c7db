//! `family-tree-api`: serves notes, multimedia links and families over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin family-tree-api
//!
//! # Run on the in-memory store
//! API_STORAGE=memory cargo run --bin family-tree-api
//! ```
//!
//! # Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `8080` |
//! | `API_STORAGE` (`postgres`, `memory`) | `postgres` |
//! | `API_DATABASE_URL` | local `family_tree` database |
//! | `API_MAX_CONNECTIONS` | `10` |
//! | `API_LOG_LEVEL` | `info` |
//! | `API_LOG_FORMAT` (`plain`, `json`) | `plain` |

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_tree::InMemoryUnitOfWorkFactory;
use infra_db::{create_pool, run_migrations, DatabaseConfig, PgUnitOfWorkFactory};
use interface_api::config::{ApiConfig, LogFormat, StorageKind};
use interface_api::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting Family Tree API Server"
    );

    let app = build_app(&config).await?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    tracing::info!(%addr, "Accepting connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Stopped");
    Ok(())
}

/// Opens the configured storage backend and builds the router over it
async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    match config.storage {
        StorageKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(create_router(InMemoryUnitOfWorkFactory::new(), config.clone()))
        }
        StorageKind::Postgres => {
            let database = DatabaseConfig::new(&config.database_url)
                .max_connections(config.max_connections);
            let pool = create_pool(database)
                .await
                .context("failed to connect to the database")?;
            run_migrations(&pool)
                .await
                .context("failed to migrate the schema")?;
            Ok(create_router(PgUnitOfWorkFactory::new(pool), config.clone()))
        }
    }
}

/// `RUST_LOG` wins over `API_LOG_LEVEL`
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Plain => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Resolves on Ctrl+C or SIGTERM; in-flight requests still finish
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!(signal = "SIGINT", "Shutting down");
        }
        _ = terminate => {
            tracing::info!(signal = "SIGTERM", "Shutting down");
        }
    }
}
