//! Domain models
//!
//! Rows as persisted in the store. `Product` is the derived "current state"
//! cache; `StockTransaction` is the append-only audit trail that outlives
//! product deletion.

mod product;
mod transaction;
mod user;

pub use product::Product;
pub use transaction::{SalesChannel, StockTransaction, TxKind};
pub use user::{PROTECTED_ADMIN, Role, User};
