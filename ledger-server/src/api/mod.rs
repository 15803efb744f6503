//! HTTP API
//!
//! Route composition and the middleware stack. Every `/api/` route except
//! login requires authentication; mutation routes additionally require the
//! admin role (gated per-router with `route_layer`).

pub mod auth;
pub mod inventory;
pub mod reports;
pub mod transactions;
pub mod users;

use axum::{Router, middleware, routing::delete};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the application router with all routes and layers
pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(inventory::router())
        .merge(transactions::router())
        .merge(reports::router())
        .merge(users::router())
        .route(
            "/api/reset",
            delete(inventory::handler::reset_all)
                .layer(middleware::from_fn(crate::auth::require_admin)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
