//! Transactions API Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use shared::StockTransaction;
use shared::request::LedgerQuery;
use shared::response::MessageResponse;

use crate::core::ServerState;
use crate::db::repository::TransactionRepository;
use crate::reporting;
use crate::utils::AppResult;

/// GET /api/transactions?start=&end=&product= - ledger listing, newest first.
/// Filters are optional; bounds are inclusive on the date prefix and the
/// product filter matches case-insensitively.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let repo = TransactionRepository::new(state.get_pool());
    let transactions = repo.find_all().await?;
    Ok(Json(reporting::filter_transactions(&transactions, &query)))
}

/// DELETE /api/transactions/reset - clear the ledger
pub async fn reset_ledger(State(state): State<ServerState>) -> AppResult<Json<MessageResponse>> {
    state.engine.reset_ledger().await?;
    Ok(Json(MessageResponse::new("All transactions cleared")))
}
