//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → middleware/dispatch.rs (route table lookup, metrics)
//!     → handlers.rs (dispatch by endpoint)
//!     → extract.rs (path id, product body)
//!     → handlers.rs (store call)
//!     → error.rs (failure → status code + body)
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
