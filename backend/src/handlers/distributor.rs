//! HTTP handlers for distributors

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::models::{CreateDistributorInput, Distributor};
use crate::services::DistributorService;
use crate::AppState;

pub async fn create_distributor(
    State(state): State<AppState>,
    Json(input): Json<CreateDistributorInput>,
) -> AppResult<(StatusCode, Json<Distributor>)> {
    let service = DistributorService::new(state.db);
    let distributor = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(distributor)))
}

pub async fn get_distributor(
    State(state): State<AppState>,
    Path(distributor_id): Path<Uuid>,
) -> AppResult<Json<Distributor>> {
    let service = DistributorService::new(state.db);
    let distributor = service.get(distributor_id).await?;
    Ok(Json(distributor))
}

pub async fn list_distributors(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<Distributor>>> {
    let service = DistributorService::new(state.db);
    let distributors = service.list(&pagination).await?;
    Ok(Json(distributors))
}
