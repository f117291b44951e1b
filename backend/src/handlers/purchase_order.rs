//! HTTP handlers for purchase orders (órdenes de compra)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::models::{CreatePurchaseOrderInput, DepositInput, PurchaseOrder};
use crate::services::{PurchaseOrderFilter, PurchaseOrderService};
use crate::AppState;

/// Create a purchase order with its derived totals
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<(StatusCode, Json<PurchaseOrder>)> {
    let service = PurchaseOrderService::new(state.db);
    let order = service
        .create(input, &state.config.business.currency)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get a purchase order by ID
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.get(order_id).await?;
    Ok(Json(order))
}

/// List purchase orders, optionally by distributor or payment status
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(filter): Query<PurchaseOrderFilter>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<PurchaseOrder>>> {
    let service = PurchaseOrderService::new(state.db);
    let orders = service.list(&filter, &pagination).await?;
    Ok(Json(orders))
}

/// Replace a purchase order's inputs
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.update(order_id, input).await?;
    Ok(Json(order))
}

/// Delete a purchase order
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = PurchaseOrderService::new(state.db);
    service.delete(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record a deposit (abono) against a purchase order
pub async fn record_purchase_order_deposit(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<DepositInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.record_deposit(order_id, input).await?;
    Ok(Json(order))
}
