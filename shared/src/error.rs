//! Domain error taxonomy
//!
//! Every business-rule violation the mutation engine can produce, plus the
//! storage failure passthrough. Transport-level mapping (HTTP status codes)
//! lives in the server crate.

use thiserror::Error;

/// Errors surfaced by the mutation engine and the access gateway
#[derive(Debug, Error)]
pub enum StockError {
    /// Missing name, non-positive or non-numeric quantity/price
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown product id or name on update/delete
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Stock-out requested more units than are on hand.
    /// Must hard-stop before any write; oversold transactions are never recorded.
    #[error("Insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock { available: i64, requested: i64 },

    /// Username already registered
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    /// Bad credentials
    #[error("Invalid username or password")]
    Unauthorized,

    /// Underlying persistence failure, propagated as-is (no internal retry)
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type StockResult<T> = Result<T, StockError>;
