//! Reports API module

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", report_routes())
}

fn report_routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/summary", get(handler::summary))
}
