//! # Product Repository (PostgreSQL)
//!
//! SQL for the `products` table.
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation              SQL                                 Round trips │
//! │  ────────────────────   ─────────────────────────────────   ─────────── │
//! │  add                    INSERT ... RETURNING *              1           │
//! │  get_by_id              SELECT ... WHERE id = $1            1           │
//! │  get_all                SELECT ... ORDER BY id              1           │
//! │  get_all_by_store       SELECT ... WHERE store = $1         1           │
//! │  delete_by_id           DELETE ... WHERE id = $1            1           │
//! │  update_product_price   UPDATE ... SET price WHERE id = $1  1           │
//! │                                                                         │
//! │  Delete and update check rows_affected: 0 rows → NotFound.             │
//! │  A row deleted concurrently is therefore reported, never skipped.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement runs under the repository's query deadline.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};
use crate::repository::ProductRepository;
use product_core::{Product, ProductId};

const ENTITY: &str = "Product";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.add(&new_product).await?;
/// let same = repo.get_by_id(product.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgProductRepository {
    /// Creates a new PgProductRepository.
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        PgProductRepository {
            pool,
            query_timeout,
        }
    }

    /// Runs `query` under the deadline, converting both failure modes to DbError.
    async fn with_deadline<T, F>(&self, operation: &'static str, query: F) -> DbResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(DbError::from),
            Err(_) => Err(DbError::Timeout {
                operation,
                after: self.query_timeout,
            }),
        }
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        self.with_deadline(
            "count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products").fetch_one(&self.pool),
        )
        .await
    }

    /// Removes every product and restarts the id sequence.
    ///
    /// ## Usage
    /// `seed --reset` and integration tests only.
    pub async fn truncate(&self) -> DbResult<()> {
        self.with_deadline(
            "truncate",
            sqlx::query("TRUNCATE TABLE products RESTART IDENTITY").execute(&self.pool),
        )
        .await?;

        info!("Products table truncated");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn add(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, store = %product.store, "Inserting product");

        let result = self
            .with_deadline(
                "add",
                sqlx::query_as::<_, Product>(
                    r#"
                    INSERT INTO products (name, price, discount, store)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, name, price, discount, store
                    "#,
                )
                .bind(&product.name)
                .bind(product.price)
                .bind(product.discount)
                .bind(&product.store)
                .fetch_one(&self.pool),
            )
            .await;

        match result {
            Ok(stored) => {
                info!(id = stored.id, name = %stored.name, "Product added");
                Ok(stored)
            }
            Err(e) => {
                error!(error = %e, name = %product.name, "Error while inserting product");
                Err(e)
            }
        }
    }

    async fn get_by_id(&self, id: ProductId) -> DbResult<Product> {
        debug!(id, "Fetching product");

        let product = self
            .with_deadline(
                "get_by_id",
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, price, discount, store
                    FROM products
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await
            .inspect_err(|e| error!(error = %e, id, "Error while fetching product"))?;

        product.ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    async fn get_all(&self) -> DbResult<Vec<Product>> {
        let products = self
            .with_deadline(
                "get_all",
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, price, discount, store
                    FROM products
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await
            .inspect_err(|e| error!(error = %e, "Error while fetching products"))?;

        debug!(count = products.len(), "Fetched all products");
        Ok(products)
    }

    async fn get_all_by_store(&self, store: &str) -> DbResult<Vec<Product>> {
        let products = self
            .with_deadline(
                "get_all_by_store",
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, price, discount, store
                    FROM products
                    WHERE store = $1
                    ORDER BY id
                    "#,
                )
                .bind(store)
                .fetch_all(&self.pool),
            )
            .await
            .inspect_err(|e| error!(error = %e, store, "Error while fetching products"))?;

        debug!(store, count = products.len(), "Fetched products by store");
        Ok(products)
    }

    async fn delete_by_id(&self, id: ProductId) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = self
            .with_deadline(
                "delete_by_id",
                sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await
            .inspect_err(|e| error!(error = %e, id, "Error while deleting product"))?;

        if result.rows_affected() == 0 {
            error!(id, "Product to delete not found");
            return Err(DbError::not_found(ENTITY, id));
        }

        info!(id, "Product deleted");
        Ok(())
    }

    async fn update_product_price(&self, id: ProductId, price: f32) -> DbResult<()> {
        debug!(id, price, "Updating product price");

        let result = self
            .with_deadline(
                "update_product_price",
                sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
                    .bind(price)
                    .bind(id)
                    .execute(&self.pool),
            )
            .await
            .inspect_err(|e| error!(error = %e, id, "Error while updating product price"))?;

        if result.rows_affected() == 0 {
            error!(id, "Product to update not found");
            return Err(DbError::not_found(ENTITY, id));
        }

        info!(id, price, "Product price updated");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.with_deadline("health_check", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::pool::DbConfig;

    /// A repository whose server accepts the TCP connection and never
    /// answers the startup handshake.
    fn silent_server_repository(
        listener: &TcpListener,
        query_timeout: Duration,
    ) -> PgProductRepository {
        let port = listener.local_addr().unwrap().port();
        let options = DbConfig::new("127.0.0.1", "productapp")
            .port(port)
            .connect_options();

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy_with(options);

        PgProductRepository::new(pool, query_timeout)
    }

    #[tokio::test]
    async fn test_query_deadline_expires() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let repo = silent_server_repository(&listener, Duration::from_millis(50));

        let err = repo.get_all().await.unwrap_err();
        match err {
            DbError::Timeout { operation, after } => {
                assert_eq!(operation, "get_all");
                assert_eq!(after, Duration::from_millis(50));
            }
            other => panic!("expected a timeout, got {other:?}"),
        }

        let err = repo.update_product_price(1, 10.0).await.unwrap_err();
        assert!(matches!(err, DbError::Timeout { .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_health_check_false_when_deadline_expires() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let repo = silent_server_repository(&listener, Duration::from_millis(50));

        assert!(!repo.health_check().await);
    }
}
