//! JSON wire representation of a product.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Product;

/// Response body for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductJson {
    pub id: i64,
    pub name: String,
}

impl From<Product> for ProductJson {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
        }
    }
}

/// Request body accepted by create and update.
///
/// A client may echo back a full record; its `id` is type-checked and then
/// ignored, since ids belong to the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Why a request body could not be decoded.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("empty request body")]
    Empty,

    #[error("malformed product payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode a create/update payload.
pub fn decode_input(body: &[u8]) -> Result<ProductInput, WireError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(WireError::Empty);
    }
    Ok(serde_json::from_slice(body)?)
}
