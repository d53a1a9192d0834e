//! Request extractors for product handlers.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;

use crate::http::error::ApiError;
use crate::product::{decode_input, ProductInput};
use crate::routing::PathParams;

/// Product id taken from the `{id}` path segment.
///
/// Reads the parameters the dispatch middleware captured. The route table
/// already restricts the segment to digits; this still re-parses it and
/// rejects values that overflow `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .extensions
            .get::<PathParams>()
            .and_then(|params| params.get("id"))
            .ok_or(ApiError::InvalidId)?;

        parse_id(raw).map(PathId).ok_or_else(|| {
            tracing::debug!(id = %raw, "Rejected product id");
            ApiError::InvalidId
        })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// Create/update payload decoded from the raw body.
///
/// Content-Type is not inspected; any body that decodes is accepted.
#[derive(Debug, Clone)]
pub struct ProductBody(pub ProductInput);

impl<S> FromRequest<S> for ProductBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|err| {
            tracing::debug!(error = %err, "Failed to read request body");
            ApiError::InvalidInput
        })?;

        decode_input(&body).map(ProductBody).map_err(|err| {
            tracing::debug!(error = %err, "Rejected product payload");
            ApiError::InvalidInput
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::routing::PathPattern;
    use axum::http::Request as HttpRequest;

    fn parts_for(path: &str) -> Parts {
        let (mut parts, _) = HttpRequest::builder().uri(path).body(()).unwrap().into_parts();
        if let Some(params) = PathPattern::parse("/products/{id:digits}").captures(path) {
            parts.extensions.insert(params);
        }
        parts
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("2147483648"), Some(2_147_483_648));
        assert_eq!(parse_id("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_id("9223372036854775808"), None); // Overflows i64
        assert_eq!(parse_id("99999999999999999999"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
    }

    #[tokio::test]
    async fn test_path_id_reads_captured_params() {
        let mut parts = parts_for("/products/2147483648");
        let id = PathId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id, PathId(2_147_483_648));
    }

    #[tokio::test]
    async fn test_path_id_without_captured_params_is_invalid() {
        let mut parts = parts_for("/healthz");
        assert!(matches!(
            PathId::from_request_parts(&mut parts, &()).await,
            Err(ApiError::InvalidId)
        ));
    }
}
