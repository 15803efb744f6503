//! Transaction (ledger) Repository
//!
//! Append and list only. Individual entries are never updated or deleted;
//! `truncate` is the single administrative exception.

use sqlx::{SqliteExecutor, SqlitePool};

use shared::StockTransaction;

use super::RepoResult;

#[derive(Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Full ledger, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<StockTransaction>> {
        let transactions = sqlx::query_as::<_, StockTransaction>(
            "SELECT id, type, name, quantity, price, channel, reason, timestamp \
             FROM transactions ORDER BY timestamp DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    pub async fn append(ex: impl SqliteExecutor<'_>, tx: &StockTransaction) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO transactions (id, type, name, quantity, price, channel, reason, timestamp) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&tx.id)
        .bind(tx.kind)
        .bind(&tx.name)
        .bind(tx.quantity)
        .bind(tx.price)
        .bind(&tx.channel)
        .bind(&tx.reason)
        .bind(tx.timestamp)
        .execute(ex)
        .await?;
        Ok(())
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Administrative wipe
    pub async fn truncate(ex: impl SqliteExecutor<'_>) -> RepoResult<()> {
        sqlx::query("DELETE FROM transactions").execute(ex).await?;
        Ok(())
    }
}
