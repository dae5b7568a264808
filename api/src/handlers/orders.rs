//! Order handlers
//!
//! Endpoints for the order board and order management.
//! The board supports content negotiation: Accept: application/json for JSON,
//! otherwise text/plain.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::app::{OrderFilter, OrderView};
use crate::domain::entities::{OrderDraft, OrderId, ProductId};
use crate::error::AppError;
use crate::handlers::{accepts, plain_text};
use crate::report::{render_board, render_totals};
use crate::AppState;

/// Request body for POST /orders/:id/items
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: u32,
}

/// GET /orders
///
/// The order board: filtered orders sorted by delivery date, plus totals.
/// - Accept: application/json → JSON response
/// - Otherwise → Plain text
pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let board = state.store_service.board(&filter)?;

    if accepts(&headers, "application/json") {
        Ok(Json(board).into_response())
    } else {
        Ok(plain_text(render_board(&board, &filter)))
    }
}

/// GET /orders/totals
///
/// JSON unless the client asks for text/plain.
pub async fn get_totals(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let totals = state.store_service.totals(&filter)?;

    if accepts(&headers, "text/plain") {
        Ok(plain_text(render_totals(&totals)))
    } else {
        Ok(Json(totals).into_response())
    }
}

/// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, AppError> {
    let order = state
        .store_service
        .order(&OrderId::from(id.as_str()))?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(order))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let order = state.store_service.add_order(draft)?;
    tracing::info!(order_id = %order.id, customer = %order.customer_name, "Order created");

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /orders/:id
///
/// Replace everything but the id. An unknown id is a no-op answered with 204.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<OrderDraft>,
) -> Result<Response, AppError> {
    let updated = state
        .store_service
        .update_order(&OrderId::from(id), draft)?;

    Ok(match updated {
        Some(order) => Json(order).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /orders/:id/items
///
/// Add a product line, or bump the quantity of the existing one.
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<OrderView>, AppError> {
    let order = state.store_service.add_order_item(
        &OrderId::from(id),
        &ProductId::from(request.product_id),
        request.quantity,
    )?;
    Ok(Json(order))
}

/// DELETE /orders/:id/items/:product_id
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<Json<OrderView>, AppError> {
    let order = state
        .store_service
        .remove_order_item(&OrderId::from(id), &ProductId::from(product_id))?;
    Ok(Json(order))
}

/// DELETE /orders/:id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = OrderId::from(id);
    if state.store_service.delete_order(&id)? {
        tracing::info!(order_id = %id, "Order deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
