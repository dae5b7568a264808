//! Product handlers
//!
//! Endpoints for the product catalog.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{Product, ProductId};
use crate::error::AppError;
use crate::handlers::{accepts, plain_text};
use crate::report::render_products;
use crate::AppState;

/// Request body for creating or renaming a product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    /// Missing names are rejected by validation, not by the extractor
    #[serde(default)]
    pub name: String,
}

/// GET /products
///
/// JSON unless the client asks for text/plain.
pub async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let products = state.store_service.list_products()?;

    if accepts(&headers, "text/plain") {
        Ok(plain_text(render_products(&products)))
    } else {
        Ok(Json(products).into_response())
    }
}

/// POST /products
///
/// Add a product to the catalog.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.store_service.add_product(&request.name)?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /products/:id
///
/// Rename a product. An unknown id is a no-op answered with 204.
pub async fn rename_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProductRequest>,
) -> Result<Response, AppError> {
    let updated = state
        .store_service
        .rename_product(&ProductId::from(id), &request.name)?;

    Ok(match updated {
        Some(product) => Json(product).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// DELETE /products/:id
///
/// Remove a product. Refused with 409 while an order still uses it.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = ProductId::from(id);
    if state.store_service.delete_product(&id)? {
        tracing::info!(product_id = %id, "Product deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
