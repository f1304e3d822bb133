//! # In-Memory Product Repository
//!
//! A `ProductRepository` over a `Vec` behind a `tokio::sync::RwLock`. Honors
//! the same contract as the PostgreSQL implementation (ids from a counter
//! starting at 1, results in id order, NotFound on missing ids) so service
//! and HTTP tests run without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::repository::ProductRepository;
use product_core::{Product, ProductId};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Product>,
    last_id: ProductId,
}

/// Test double for [`ProductRepository`].
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `products` as-is.
    ///
    /// The id counter continues after the highest id given.
    pub fn with_products(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.id);
        let last_id = products.iter().map(|p| p.id).max().unwrap_or(0);

        InMemoryProductRepository {
            table: RwLock::new(Table {
                rows: products,
                last_id,
            }),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn add(&self, product: &Product) -> DbResult<Product> {
        let mut table = self.table.write().await;

        table.last_id += 1;
        let stored = Product {
            id: table.last_id,
            ..product.clone()
        };
        table.rows.push(stored.clone());

        Ok(stored)
    }

    async fn get_by_id(&self, id: ProductId) -> DbResult<Product> {
        let table = self.table.read().await;

        table
            .rows
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn get_all(&self) -> DbResult<Vec<Product>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn get_all_by_store(&self, store: &str) -> DbResult<Vec<Product>> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .iter()
            .filter(|p| p.store == store)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: ProductId) -> DbResult<()> {
        let mut table = self.table.write().await;

        let index = table
            .rows
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DbError::not_found("Product", id))?;
        table.rows.remove(index);

        Ok(())
    }

    async fn update_product_price(&self, id: ProductId, price: f32) -> DbResult<()> {
        let mut table = self.table.write().await;

        let product = table
            .rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::not_found("Product", id))?;
        product.price = price;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
