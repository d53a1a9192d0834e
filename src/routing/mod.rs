//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (segment match, digit constraints)
//!     → Return: matched Endpoint + params, MethodNotAllowed, or NotFound
//!
//! Route Compilation (at startup):
//!     RouteTable::catalog()
//!     → Compile patterns
//!     → Freeze as immutable table shared via Arc
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - The table is the only route definition: every request is resolved
//!   here and dispatched by [`Endpoint`], so constrained parameters never
//!   reach a handler unchecked
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern};
pub use router::{Endpoint, Route, RouteMatch, RouteTable};
