//! Shared types for the Stockroom inventory ledger
//!
//! Domain models, request/response DTOs and the domain error taxonomy,
//! shared between the server and any client crate.

pub mod error;
pub mod models;
pub mod request;
pub mod response;

pub use error::{StockError, StockResult};
pub use models::{Product, Role, SalesChannel, StockTransaction, TxKind, User};
