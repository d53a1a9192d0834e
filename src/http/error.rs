//! Mapping of handler failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Errors a product handler can return.
///
/// The `Display` text is the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id could not be parsed as a product id.
    #[error("Invalid ID")]
    InvalidId,

    /// Request body could not be decoded into a product.
    #[error("Invalid input")]
    InvalidInput,

    #[error("Product not found")]
    NotFound,

    /// Any other store failure, passed through verbatim.
    #[error("{0}")]
    Store(StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Store(err) = &self {
            tracing::error!(error = %err, "Store operation failed");
        }
        (status, self.to_string()).into_response()
    }
}
