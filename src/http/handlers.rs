//! Product handlers: validate, call the store, shape the response.

use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::http::error::ApiError;
use crate::http::extract::{PathId, ProductBody};
use crate::http::middleware::not_found;
use crate::http::server::AppState;
use crate::product::ProductJson;
use crate::routing::Endpoint;

/// Run the handler for the endpoint the route table resolved.
///
/// Requests that did not pass through the dispatch middleware carry no
/// [`Endpoint`] and get the plain 404.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let Some(endpoint) = req.extensions().get::<Endpoint>().copied() else {
        return not_found();
    };

    match endpoint {
        Endpoint::Health => health.call(req, state).await,
        Endpoint::ListProducts => list_products.call(req, state).await,
        Endpoint::GetProduct => get_product.call(req, state).await,
        Endpoint::CreateProduct => create_product.call(req, state).await,
        Endpoint::UpdateProduct => update_product.call(req, state).await,
        Endpoint::DeleteProduct => delete_product.call(req, state).await,
    }
}

/// Liveness probe. Never touches the store.
pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductJson>>, ApiError> {
    let products = state.store.list().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products.into_iter().map(ProductJson::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ProductJson>, ApiError> {
    let product = state.store.get(id).await?;
    Ok(Json(product.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    ProductBody(input): ProductBody,
) -> Result<(StatusCode, Json<ProductJson>), ApiError> {
    let product = state.store.insert(&input.name).await?;
    tracing::info!(product_id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Writes first, then re-reads. An update to a missing id affects no rows
/// and only surfaces as 404 through the re-read.
pub async fn update_product(
    State(state): State<AppState>,
    PathId(id): PathId,
    ProductBody(input): ProductBody,
) -> Result<Json<ProductJson>, ApiError> {
    let affected = state.store.update_name(id, &input.name).await?;
    tracing::debug!(product_id = id, affected, "Product update executed");

    let product = state.store.get(id).await?;
    tracing::info!(product_id = id, "Product updated");
    Ok(Json(product.into()))
}

/// Deleting an id that does not exist is still a success.
pub async fn delete_product(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {
    let affected = state.store.delete(id).await?;
    tracing::info!(product_id = id, affected, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
