//! Repository Module
//!
//! CRUD access to the three tables. No business logic lives here — invariant
//! enforcement is the engine's job. Write-path methods take an explicit
//! executor so the engine can run them inside one SQL transaction.

pub mod product;
pub mod transaction;
pub mod user;

pub use product::ProductRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
