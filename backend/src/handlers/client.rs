//! HTTP handlers for clients

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::models::{Client, CreateClientInput};
use crate::services::ClientService;
use crate::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClientInput>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let service = ClientService::new(state.db);
    let client = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.get(client_id).await?;
    Ok(Json(client))
}

pub async fn list_clients(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<Client>>> {
    let service = ClientService::new(state.db);
    let clients = service.list(&pagination).await?;
    Ok(Json(clients))
}
