//! Product Repository

use sqlx::{SqliteExecutor, SqlitePool};

use shared::Product;

use super::RepoResult;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All products, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price, created_at FROM products ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Self::get(&self.pool, id).await
    }

    /// Lookup by id on an arbitrary executor (pool or open transaction)
    pub async fn get(ex: impl SqliteExecutor<'_>, id: &str) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price, created_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(ex)
        .await?;
        Ok(product)
    }

    /// Case-insensitive exact-name lookup — the de-facto business key.
    /// No trimming, no fuzzy matching.
    pub async fn get_by_name_ci(
        ex: impl SqliteExecutor<'_>,
        name: &str,
    ) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, quantity, price, created_at FROM products \
             WHERE name = ?1 COLLATE NOCASE LIMIT 1",
        )
        .bind(name)
        .fetch_optional(ex)
        .await?;
        Ok(product)
    }

    pub async fn insert(ex: impl SqliteExecutor<'_>, product: &Product) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, quantity, price, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price)
        .bind(product.created_at)
        .execute(ex)
        .await?;
        Ok(())
    }

    /// Write the computed quantity (and optionally a new price) back
    pub async fn update_stock(
        ex: impl SqliteExecutor<'_>,
        id: &str,
        quantity: i64,
        price: Option<f64>,
    ) -> RepoResult<bool> {
        let result = match price {
            Some(p) => {
                sqlx::query("UPDATE products SET quantity = ?2, price = ?3 WHERE id = ?1")
                    .bind(id)
                    .bind(quantity)
                    .bind(p)
                    .execute(ex)
                    .await?
            }
            None => {
                sqlx::query("UPDATE products SET quantity = ?2 WHERE id = ?1")
                    .bind(id)
                    .bind(quantity)
                    .execute(ex)
                    .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }

    /// Hard delete; returns whether a row existed
    pub async fn delete(ex: impl SqliteExecutor<'_>, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(ex)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Administrative wipe
    pub async fn truncate(ex: impl SqliteExecutor<'_>) -> RepoResult<()> {
        sqlx::query("DELETE FROM products").execute(ex).await?;
        Ok(())
    }
}
