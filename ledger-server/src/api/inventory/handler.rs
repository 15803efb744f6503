//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::Product;
use shared::request::{ReturnStockRequest, StockInRequest, StockOutRequest};
use shared::response::MessageResponse;

use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::AppResult;

/// GET /api/inventory - current product list
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_pool());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// POST /api/inventory/stock-in - receive stock, creating the product on
/// first sight
pub async fn stock_in(
    State(state): State<ServerState>,
    Json(req): Json<StockInRequest>,
) -> AppResult<Json<Product>> {
    let product = state
        .engine
        .stock_in(&req.name, req.quantity, req.price, req.date)
        .await?;
    Ok(Json(product))
}

/// POST /api/inventory/stock-out - sell stock through a channel
pub async fn stock_out(
    State(state): State<ServerState>,
    Json(req): Json<StockOutRequest>,
) -> AppResult<Json<Product>> {
    let product = state
        .engine
        .stock_out(&req.name, req.quantity, req.price, &req.channel)
        .await?;
    Ok(Json(product))
}

/// POST /api/inventory/return - reinstate returned stock
pub async fn return_stock(
    State(state): State<ServerState>,
    Json(req): Json<ReturnStockRequest>,
) -> AppResult<Json<Product>> {
    let product = state
        .engine
        .return_stock(&req.name, req.quantity, &req.reason)
        .await?;
    Ok(Json(product))
}

/// DELETE /api/inventory/{id} - remove a product entirely
pub async fn delete_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.engine.delete_product(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

/// DELETE /api/inventory/reset - clear all products, keep the ledger
pub async fn reset_inventory(
    State(state): State<ServerState>,
) -> AppResult<Json<MessageResponse>> {
    state.engine.reset_inventory().await?;
    Ok(Json(MessageResponse::new("All inventory cleared")))
}

/// DELETE /api/reset - clear products and ledger
pub async fn reset_all(State(state): State<ServerState>) -> AppResult<Json<MessageResponse>> {
    state.engine.reset_all().await?;
    Ok(Json(MessageResponse::new("All data cleared")))
}
