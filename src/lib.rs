//! Product catalog service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod product;
pub mod routing;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use product::Product;
pub use store::{MemoryStore, PgProductStore, ProductStore, StoreError};
