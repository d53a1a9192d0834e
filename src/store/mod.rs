//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → ProductStore (trait object held in AppState)
//!     → postgres.rs (parameterized SQL over a PgPool)
//!     → row decode → Product
//!
//! Tests swap in memory.rs behind the same trait.
//! ```
//!
//! # Design Decisions
//! - One pool handle for the whole process, shared through `Arc`
//! - Absence is reported as `StoreError::NotFound`, distinct from I/O failures
//! - No retries here; every failure goes straight back to the caller

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::product::Product;

pub use memory::MemoryStore;
pub use postgres::PgProductStore;

/// Failure reported by a [`ProductStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The statement ran but matched no row.
    #[error("no rows in result set")]
    NotFound,

    /// Anything the database driver reported: connectivity, constraint
    /// violations, timeouts.
    #[error("{0}")]
    Database(#[source] sqlx::Error),

    /// The store refused the call without reaching a database.
    #[error("{0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Data access for the products table.
///
/// Implementations must be safe to share across concurrently running
/// requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, ordered by id.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Exactly one product, or `StoreError::NotFound`.
    async fn get(&self, id: i64) -> Result<Product, StoreError>;

    /// Insert a row and return it with the id the store assigned.
    async fn insert(&self, name: &str) -> Result<Product, StoreError>;

    /// Set the name of `id`. Returns the number of rows affected; zero is
    /// not an error.
    async fn update_name(&self, id: i64, name: &str) -> Result<u64, StoreError>;

    /// Remove `id`. Returns the number of rows affected; zero is not an
    /// error.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    /// Release pooled resources. Called once after the server stops.
    async fn close(&self) {}
}
