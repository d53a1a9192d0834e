//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Connect to the store (optionally creating the schema)
//! - Bind the listener and serve until a termination signal
//! - Close the store once in-flight requests have drained
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when the store is reachable)

use std::net::AddrParseError;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::store::{PgProductStore, ProductStore, StoreError};

/// Failure that stops the service from starting (or keeps it from
/// serving).
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address: {0}")]
    Address(#[from] AddrParseError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("database: {0}")]
    Store(#[from] StoreError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the service with a validated configuration until shutdown.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let pg = PgProductStore::connect(&config.database).await?;
    if config.database.create_schema {
        pg.ensure_schema().await?;
    }
    let store: Arc<dyn ProductStore> = Arc::new(pg);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(&config, store.clone());
    let served = server.run(listener, shutdown.subscribe()).await;

    store.close().await;
    served.map_err(StartupError::from)
}
