//! The product resource.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → wire.rs (decode ProductInput, reject malformed payloads)
//!     → handlers (store call)
//!     → Product (record shared by every layer)
//!     → wire.rs (ProductJson for the response body)
//! ```
//!
//! Row decoding lives next to the SQL in `store::postgres`, so the wire and
//! storage shapes can change independently of [`Product`].

pub mod wire;

pub use wire::{decode_input, ProductInput, ProductJson, WireError};

/// A product as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Assigned by the store on insert; never changes afterwards.
    pub id: i64,
    pub name: String,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
