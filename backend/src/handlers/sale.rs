//! HTTP handlers for sales (ventas)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::models::{CreateSaleInput, DepositInput, Sale};
use crate::services::{SaleFilter, SaleService};
use crate::AppState;

/// Register a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let service = SaleService::new(state.db);
    let sale = service
        .create(input, &state.config.business.currency)
        .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Get a sale by ID
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<Sale>> {
    let service = SaleService::new(state.db);
    let sale = service.get(sale_id).await?;
    Ok(Json(sale))
}

/// List sales
pub async fn list_sales(
    State(state): State<AppState>,
    Query(filter): Query<SaleFilter>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<Sale>>> {
    let service = SaleService::new(state.db);
    let sales = service.list(&filter, &pagination).await?;
    Ok(Json(sales))
}

/// Record a deposit (abono) against a sale
pub async fn record_sale_deposit(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(input): Json<DepositInput>,
) -> AppResult<Json<Sale>> {
    let service = SaleService::new(state.db);
    let sale = service.record_deposit(sale_id, input).await?;
    Ok(Json(sale))
}
