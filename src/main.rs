//! Product Catalog service.
//!
//! A CRUD service for a single `products` table, built with Tokio, Axum and
//! sqlx.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                   PRODUCT CATALOG                     │
//!                     │                                                       │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────────┐  │
//!   ──────────────────┼─▶│   http   │──▶│ routing  │──▶│    handlers      │  │
//!                     │  │  server  │   │  table   │   │ validate → call  │  │
//!                     │  └──────────┘   └──────────┘   └────────┬─────────┘  │
//!                     │                                         │            │
//!                     │                                         ▼            │
//!   Client Response   │  ┌──────────┐                   ┌──────────────────┐  │
//!   ◀─────────────────┼──│ product  │◀──────────────────│      store       │◀─┼── PostgreSQL
//!                     │  │  codec   │                   │ (PgPool, sqlx)   │  │
//!                     │  └──────────┘                   └──────────────────┘  │
//!                     │                                                       │
//!                     │   config · observability · lifecycle                  │
//!                     └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! An optional TOML file (`--config`), overridden by `DB_USER`,
//! `DB_PASSWORD`, `DB_HOST`, `DB_PORT` and `DB_NAME`.

use std::path::PathBuf;

use clap::Parser;

use product_catalog::config::load_config;
use product_catalog::lifecycle;
use product_catalog::observability::logging;

#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(about = "CRUD service for the products table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("product-catalog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database_host = %config.database.host,
        database_port = config.database.port,
        database_name = %config.database.name,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
