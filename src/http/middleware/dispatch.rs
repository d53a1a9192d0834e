//! Route dispatch middleware.
//! Resolves every request against the route table before any handler runs.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::Span;

use crate::observability::metrics;
use crate::routing::{RouteMatch, RouteTable};

/// Body returned when no route matches the path.
pub const NOT_FOUND_BODY: &str = "404 page not found";

pub async fn route_dispatch(
    State(table): State<Arc<RouteTable>>,
    mut req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();

    // 1. Match on the decoded path, so `/products/%31` is product 1.
    let path = percent_decode_str(req.uri().path())
        .decode_utf8_lossy()
        .into_owned();

    // 2. Resolve against the table; only matched requests reach a handler.
    let (route, response) = match table.resolve(&method, &path) {
        RouteMatch::Found { route, params } => {
            let name = route.endpoint.name();
            Span::current().record("route", name);
            req.extensions_mut().insert(route.endpoint);
            req.extensions_mut().insert(params);
            (name, next.run(req).await)
        }
        RouteMatch::MethodNotAllowed { allowed } => {
            tracing::debug!(method = %method, path = %path, "Method not allowed");
            ("method_not_allowed", method_not_allowed(&allowed))
        }
        RouteMatch::NotFound => {
            tracing::debug!(method = %method, path = %path, "No route matched");
            ("unmatched", not_found())
        }
    };

    // 3. Record the outcome under the route name, never the raw path.
    metrics::record_request(method.as_str(), route, response.status().as_u16(), start);
    response
}

/// Plain-text 404 for paths outside the route table.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
