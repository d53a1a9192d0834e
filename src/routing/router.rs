//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Resolve (method, path) to a route, a method mismatch, or no match
//! - Return captured path parameters with the matched route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; first match wins
//! - Explicit NotFound / MethodNotAllowed rather than a silent default

use axum::http::Method;

use crate::routing::matcher::{PathParams, PathPattern};

/// Operation a route is bound to.
///
/// Once a request resolves, its endpoint is stored in the request
/// extensions; the handler dispatcher reads it from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Health,
    ListProducts,
    GetProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Endpoint {
    /// Identifier used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::ListProducts => "list_products",
            Endpoint::GetProduct => "get_product",
            Endpoint::CreateProduct => "create_product",
            Endpoint::UpdateProduct => "update_product",
            Endpoint::DeleteProduct => "delete_product",
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    pub endpoint: Endpoint,
    pub method: Method,
    pub pattern: PathPattern,
}

/// Outcome of resolving a request against the table.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    Found { route: &'a Route, params: PathParams },
    /// Some route has this path, none with this method.
    MethodNotAllowed { allowed: Vec<Method> },
    NotFound,
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route.
    pub fn route(mut self, endpoint: Endpoint, method: Method, pattern: &str) -> Self {
        self.routes.push(Route {
            endpoint,
            method,
            pattern: PathPattern::parse(pattern),
        });
        self
    }

    /// Routes served by the product catalog.
    pub fn catalog() -> Self {
        Self::new()
            .route(Endpoint::Health, Method::GET, "/healthz")
            .route(Endpoint::ListProducts, Method::GET, "/products")
            .route(Endpoint::GetProduct, Method::GET, "/products/{id:digits}")
            .route(Endpoint::CreateProduct, Method::POST, "/products")
            .route(Endpoint::UpdateProduct, Method::PUT, "/products/{id:digits}")
            .route(Endpoint::DeleteProduct, Method::DELETE, "/products/{id:digits}")
    }

    /// Resolve a request.
    pub fn resolve(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let mut allowed = Vec::new();

        for route in &self.routes {
            let Some(params) = route.pattern.captures(path) else {
                continue;
            };
            if route.method == *method {
                return RouteMatch::Found { route, params };
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed { allowed }
        }
    }
}
