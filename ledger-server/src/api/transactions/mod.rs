//! Transactions API module

pub mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/transactions", transaction_routes())
}

fn transaction_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list)).merge(
        Router::new()
            .route("/reset", delete(handler::reset_ledger))
            .route_layer(middleware::from_fn(require_admin)),
    )
}
