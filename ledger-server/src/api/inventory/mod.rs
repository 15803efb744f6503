//! Inventory API module
//!
//! The write surface is the three stock verbs plus delete. There is no
//! generic product-replace endpoint.

pub mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", inventory_routes())
}

fn inventory_routes() -> Router<ServerState> {
    let mutations = Router::new()
        .route("/stock-in", post(handler::stock_in))
        .route("/stock-out", post(handler::stock_out))
        .route("/return", post(handler::return_stock))
        .route("/reset", delete(handler::reset_inventory))
        .route("/{id}", delete(handler::delete_product))
        .route_layer(middleware::from_fn(require_admin));

    Router::new().route("/", get(handler::list)).merge(mutations)
}
