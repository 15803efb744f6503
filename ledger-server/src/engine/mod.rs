//! Inventory Mutation Engine
//!
//! The only write path into the store. Each operation is atomic: the product
//! write and the ledger append commit in one SQL transaction, or neither is
//! visible. Mutations for the same product name are serialized through a
//! per-name async mutex, so two concurrent stock-outs cannot both pass the
//! insufficient-stock check against a stale quantity.

mod ids;

pub use ids::IdGenerator;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use shared::{Product, SalesChannel, StockError, StockResult, StockTransaction, TxKind};

use crate::db::repository::{
    ProductRepository, RepoError, TransactionRepository,
};

/// Reason recorded on the terminal DELETE ledger entry
const DELETE_REASON: &str = "Product removed from inventory";

pub struct StockEngine {
    pool: SqlitePool,
    ids: IdGenerator,
    /// Per-product-name write locks, keyed by lowercased name
    name_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl StockEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ids: IdGenerator::new(),
            name_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        self.name_locks
            .entry(name.to_lowercase())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn check_input(name: &str, quantity: i64) -> StockResult<()> {
        if name.trim().is_empty() {
            return Err(StockError::InvalidInput("name is required".into()));
        }
        if quantity <= 0 {
            return Err(StockError::InvalidInput(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        Ok(())
    }

    /// Receive `quantity` units of `name` at `price`.
    ///
    /// Creates the product on first sight; otherwise increments the existing
    /// row (case-insensitive name match) and overwrites its price with the
    /// latest one entered. The ledger entry always records the price passed
    /// in. No upper bound on quantity.
    pub async fn stock_in(
        &self,
        name: &str,
        quantity: i64,
        price: f64,
        date: Option<DateTime<Utc>>,
    ) -> StockResult<Product> {
        Self::check_input(name, quantity)?;
        if price < 0.0 {
            return Err(StockError::InvalidInput("price must not be negative".into()));
        }

        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await.map_err(storage_sql)?;

        let product = match ProductRepository::get_by_name_ci(&mut *tx, name)
            .await
            .map_err(storage)?
        {
            Some(existing) => {
                let updated = Product {
                    quantity: existing.quantity + quantity,
                    price,
                    ..existing
                };
                ProductRepository::update_stock(
                    &mut *tx,
                    &updated.id,
                    updated.quantity,
                    Some(updated.price),
                )
                .await
                .map_err(storage)?;
                updated
            }
            None => {
                let product = Product {
                    id: self.ids.next(),
                    name: name.to_string(),
                    quantity,
                    price,
                    created_at: date.unwrap_or_else(Utc::now),
                };
                ProductRepository::insert(&mut *tx, &product)
                    .await
                    .map_err(storage)?;
                product
            }
        };

        let entry = StockTransaction {
            id: self.ids.next(),
            kind: TxKind::In,
            name: name.to_string(),
            quantity,
            price: Some(price),
            channel: None,
            reason: None,
            timestamp: Utc::now(),
        };
        TransactionRepository::append(&mut *tx, &entry)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage_sql)?;

        tracing::info!(name = %product.name, quantity, price, "Stock in");
        Ok(product)
    }

    /// Sell `quantity` units of `name` through `channel`.
    ///
    /// Hard-stops with `InsufficientStock` before any write when the request
    /// exceeds the units on hand — an oversold transaction is never recorded.
    pub async fn stock_out(
        &self,
        name: &str,
        quantity: i64,
        price: f64,
        channel: &SalesChannel,
    ) -> StockResult<Product> {
        Self::check_input(name, quantity)?;

        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await.map_err(storage_sql)?;

        let existing = ProductRepository::get_by_name_ci(&mut *tx, name)
            .await
            .map_err(storage)?
            .ok_or_else(|| StockError::NotFound(name.to_string()))?;

        if quantity > existing.quantity {
            return Err(StockError::InsufficientStock {
                available: existing.quantity,
                requested: quantity,
            });
        }

        let updated = Product {
            quantity: (existing.quantity - quantity).max(0),
            ..existing
        };
        ProductRepository::update_stock(&mut *tx, &updated.id, updated.quantity, None)
            .await
            .map_err(storage)?;

        let entry = StockTransaction {
            id: self.ids.next(),
            kind: TxKind::Out,
            name: updated.name.clone(),
            quantity,
            price: Some(price),
            channel: Some(channel.as_str().to_string()),
            reason: None,
            timestamp: Utc::now(),
        };
        TransactionRepository::append(&mut *tx, &entry)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage_sql)?;

        tracing::info!(name = %updated.name, quantity, channel = %channel, "Stock out");
        Ok(updated)
    }

    /// Reinstate `quantity` units of an existing product
    pub async fn return_stock(
        &self,
        name: &str,
        quantity: i64,
        reason: &str,
    ) -> StockResult<Product> {
        Self::check_input(name, quantity)?;

        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await.map_err(storage_sql)?;

        let existing = ProductRepository::get_by_name_ci(&mut *tx, name)
            .await
            .map_err(storage)?
            .ok_or_else(|| StockError::NotFound(name.to_string()))?;

        let updated = Product {
            quantity: existing.quantity + quantity,
            ..existing
        };
        ProductRepository::update_stock(&mut *tx, &updated.id, updated.quantity, None)
            .await
            .map_err(storage)?;

        let entry = StockTransaction {
            id: self.ids.next(),
            kind: TxKind::Return,
            name: updated.name.clone(),
            quantity,
            price: None,
            channel: None,
            reason: Some(reason.to_string()),
            timestamp: Utc::now(),
        };
        TransactionRepository::append(&mut *tx, &entry)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage_sql)?;

        tracing::info!(name = %updated.name, quantity, reason = %reason, "Stock returned");
        Ok(updated)
    }

    /// Remove a product entirely, appending a terminal DELETE ledger entry
    /// carrying its last known name, quantity and price.
    ///
    /// Not reversible through replay: a later stock-in with the same name
    /// creates a brand-new product with a new id.
    pub async fn delete_product(&self, id: &str) -> StockResult<Product> {
        let current = ProductRepository::get(&self.pool, id)
            .await
            .map_err(storage)?
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;

        let lock = self.lock_for(&current.name);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await.map_err(storage_sql)?;

        // Re-read under the lock; the row may have changed before we held it
        let product = ProductRepository::get(&mut *tx, id)
            .await
            .map_err(storage)?
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;

        ProductRepository::delete(&mut *tx, id)
            .await
            .map_err(storage)?;

        let entry = StockTransaction {
            id: self.ids.next(),
            kind: TxKind::Delete,
            name: product.name.clone(),
            quantity: product.quantity,
            price: Some(product.price),
            channel: None,
            reason: Some(DELETE_REASON.to_string()),
            timestamp: Utc::now(),
        };
        TransactionRepository::append(&mut *tx, &entry)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage_sql)?;

        tracing::info!(name = %product.name, id = %product.id, "Product deleted");
        Ok(product)
    }

    /// Wipe all products. The ledger stays queryable.
    /// No per-row entries are emitted for the wipe itself.
    pub async fn reset_inventory(&self) -> StockResult<()> {
        ProductRepository::truncate(&self.pool)
            .await
            .map_err(storage)?;
        tracing::warn!("Inventory reset: all products cleared");
        Ok(())
    }

    /// Wipe the ledger
    pub async fn reset_ledger(&self) -> StockResult<()> {
        TransactionRepository::truncate(&self.pool)
            .await
            .map_err(storage)?;
        tracing::warn!("Ledger reset: all transactions cleared");
        Ok(())
    }

    /// Wipe both
    pub async fn reset_all(&self) -> StockResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage_sql)?;
        ProductRepository::truncate(&mut *tx).await.map_err(storage)?;
        TransactionRepository::truncate(&mut *tx)
            .await
            .map_err(storage)?;
        tx.commit().await.map_err(storage_sql)?;
        tracing::warn!("Full reset: products and transactions cleared");
        Ok(())
    }
}

fn storage(e: RepoError) -> StockError {
    StockError::Storage(e.to_string())
}

fn storage_sql(e: sqlx::Error) -> StockError {
    StockError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::TransactionRepository;

    async fn engine() -> (StockEngine, SqlitePool) {
        let db = DbService::connect_memory().await.unwrap();
        (StockEngine::new(db.pool.clone()), db.pool)
    }

    #[tokio::test]
    async fn stock_in_creates_product_and_ledger_entry() {
        let (engine, pool) = engine().await;

        let product = engine.stock_in("Widget", 10, 5.0, None).await.unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 10);
        assert_eq!(product.price, 5.0);

        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TxKind::In);
        assert_eq!(ledger[0].quantity, 10);
        assert_eq!(ledger[0].price, Some(5.0));
    }

    #[tokio::test]
    async fn stock_in_matches_name_case_insensitively() {
        let (engine, pool) = engine().await;

        let first = engine.stock_in("Widget", 10, 5.0, None).await.unwrap();
        let second = engine.stock_in("WIDGET", 5, 5.5, None).await.unwrap();

        // Same row, incremented, price follows the latest entry
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Widget");
        assert_eq!(second.quantity, 15);
        assert_eq!(second.price, 5.5);

        let products = ProductRepository::new(pool).find_all().await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn stock_out_decrements_and_records_channel() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 10, 5.0, None).await.unwrap();

        let product = engine
            .stock_out("widget", 4, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap();
        assert_eq!(product.quantity, 6);
        // Stock-out never touches the product price
        assert_eq!(product.price, 5.0);

        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        let out = ledger.iter().find(|t| t.kind == TxKind::Out).unwrap();
        assert_eq!(out.channel.as_deref(), Some("TikTok"));
        assert_eq!(out.price, Some(6.0));
        assert_eq!(out.quantity, 4);
    }

    #[tokio::test]
    async fn oversell_is_rejected_and_nothing_is_written() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 3, 5.0, None).await.unwrap();

        let err = engine
            .stock_out("Widget", 5, 6.0, &SalesChannel::Shopee)
            .await
            .unwrap_err();
        match err {
            StockError::InsufficientStock {
                available,
                requested,
            } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // Product untouched, no OUT entry appended
        let products = ProductRepository::new(pool.clone()).find_all().await.unwrap();
        assert_eq!(products[0].quantity, 3);
        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, TxKind::In);
    }

    #[tokio::test]
    async fn stock_out_to_exactly_zero_is_allowed() {
        let (engine, _) = engine().await;
        engine.stock_in("Widget", 3, 5.0, None).await.unwrap();

        let product = engine
            .stock_out("Widget", 3, 6.0, &SalesChannel::Lazada)
            .await
            .unwrap();
        assert_eq!(product.quantity, 0);

        // Now empty: even a single unit is an oversell
        let err = engine
            .stock_out("Widget", 1, 6.0, &SalesChannel::Lazada)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StockError::InsufficientStock {
                available: 0,
                requested: 1
            }
        ));
    }

    #[tokio::test]
    async fn return_increments_and_records_reason() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 10, 5.0, None).await.unwrap();
        engine
            .stock_out("Widget", 4, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap();

        let product = engine.return_stock("Widget", 2, "damaged").await.unwrap();
        assert_eq!(product.quantity, 8);

        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        let ret = ledger.iter().find(|t| t.kind == TxKind::Return).unwrap();
        assert_eq!(ret.reason.as_deref(), Some("damaged"));
        assert_eq!(ret.price, None);
    }

    #[tokio::test]
    async fn return_requires_existing_product() {
        let (engine, _) = engine().await;
        let err = engine.return_stock("Ghost", 1, "damaged").await.unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_product_and_history_survives() {
        let (engine, pool) = engine().await;
        let product = engine.stock_in("Widget", 10, 5.0, None).await.unwrap();

        let removed = engine.delete_product(&product.id).await.unwrap();
        assert_eq!(removed.id, product.id);

        let products = ProductRepository::new(pool.clone()).find_all().await.unwrap();
        assert!(products.is_empty());

        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        let del = ledger.iter().find(|t| t.kind == TxKind::Delete).unwrap();
        assert_eq!(del.name, "Widget");
        assert_eq!(del.quantity, 10);
        assert_eq!(del.reason.as_deref(), Some("Product removed from inventory"));

        // Deleting again is NotFound
        let err = engine.delete_product(&product.id).await.unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }

    #[tokio::test]
    async fn stock_in_after_delete_creates_a_fresh_product() {
        let (engine, _) = engine().await;
        let old = engine.stock_in("Widget", 10, 5.0, None).await.unwrap();
        engine.delete_product(&old.id).await.unwrap();

        let fresh = engine.stock_in("Widget", 1, 1.0, None).await.unwrap();
        assert_ne!(fresh.id, old.id);
        assert_eq!(fresh.quantity, 1);
    }

    #[tokio::test]
    async fn non_positive_quantity_is_invalid_input() {
        let (engine, _) = engine().await;
        for qty in [0, -3] {
            let err = engine.stock_in("Widget", qty, 5.0, None).await.unwrap_err();
            assert!(matches!(err, StockError::InvalidInput(_)));
        }
        let err = engine
            .stock_out("Widget", 0, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InvalidInput(_)));
        let err = engine.return_stock("Widget", -1, "oops").await.unwrap_err();
        assert!(matches!(err, StockError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn stock_out_unknown_product_is_not_found() {
        let (engine, _) = engine().await;
        let err = engine
            .stock_out("Nothing", 1, 1.0, &SalesChannel::Shopee)
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::NotFound(_)));
    }

    #[tokio::test]
    async fn reset_inventory_keeps_the_ledger() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 10, 5.0, None).await.unwrap();
        engine.stock_in("Gadget", 4, 9.0, None).await.unwrap();

        engine.reset_inventory().await.unwrap();

        let products = ProductRepository::new(pool.clone()).find_all().await.unwrap();
        assert!(products.is_empty());
        let ledger = TransactionRepository::new(pool).find_all().await.unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn reset_all_clears_everything() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 10, 5.0, None).await.unwrap();

        engine.reset_all().await.unwrap();

        let products = ProductRepository::new(pool.clone()).find_all().await.unwrap();
        assert!(products.is_empty());
        let count = TransactionRepository::new(pool).count().await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn quantity_never_goes_negative_over_a_mixed_sequence() {
        let (engine, pool) = engine().await;
        engine.stock_in("Widget", 5, 5.0, None).await.unwrap();
        engine
            .stock_out("Widget", 2, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap();
        engine.return_stock("Widget", 1, "unopened").await.unwrap();
        engine
            .stock_out("Widget", 4, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap();
        let _ = engine
            .stock_out("Widget", 1, 6.0, &SalesChannel::TikTok)
            .await
            .unwrap_err();

        let products = ProductRepository::new(pool).find_all().await.unwrap();
        assert_eq!(products[0].quantity, 0);
    }
}
