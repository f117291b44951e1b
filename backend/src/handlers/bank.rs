//! HTTP handlers for bank and vault balances

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Bank, CapitalSummary};
use crate::services::BankService;
use crate::AppState;

/// All accounts with the capital available
pub async fn list_banks(State(state): State<AppState>) -> AppResult<Json<CapitalSummary>> {
    let service = BankService::new(state.db);
    let summary = service.summary().await?;
    Ok(Json(summary))
}

pub async fn get_bank(
    State(state): State<AppState>,
    Path(bank_id): Path<Uuid>,
) -> AppResult<Json<Bank>> {
    let service = BankService::new(state.db);
    let bank = service.get(bank_id).await?;
    Ok(Json(bank))
}
