//! # Repository Module
//!
//! Data-access abstraction for products.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductService                                                        │
//! │       │                                                                 │
//! │       │  Arc<dyn ProductRepository>                                    │
//! │       ▼                                                                 │
//! │  ProductRepository (trait)                                             │
//! │  ├── add / get_by_id / get_all / get_all_by_store                      │
//! │  ├── delete_by_id / update_product_price                               │
//! │  └── health_check                                                      │
//! │       │                                                                 │
//! │       ├──────────────────────────────┐                                 │
//! │       ▼                              ▼                                 │
//! │  PgProductRepository           InMemoryProductRepository               │
//! │  (PostgreSQL, production)      (Vec behind RwLock, tests)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Implementations
//!
//! - [`PgProductRepository`] - SQL against the shared pool
//! - [`InMemoryProductRepository`] - test double with the same contract

use async_trait::async_trait;

use crate::error::DbResult;
use product_core::{Product, ProductId};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::PgProductRepository;

/// Product data access.
///
/// ## Contract
/// - `get_by_id`, `delete_by_id` and `update_product_price` fail with
///   `DbError::NotFound` when no row has the id.
/// - `get_all` and `get_all_by_store` return an empty vector, never an
///   error, for an empty result; rows come back in id order.
/// - `add` ignores the id of its argument and returns the stored product
///   with the id the store assigned.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a product and returns it with its assigned id.
    async fn add(&self, product: &Product) -> DbResult<Product>;

    /// Fetches one product by id.
    async fn get_by_id(&self, id: ProductId) -> DbResult<Product>;

    /// Fetches every product.
    async fn get_all(&self) -> DbResult<Vec<Product>>;

    /// Fetches products whose store equals `store` exactly.
    async fn get_all_by_store(&self, store: &str) -> DbResult<Vec<Product>>;

    /// Deletes one product by id.
    async fn delete_by_id(&self, id: ProductId) -> DbResult<()>;

    /// Replaces the price of one product. No other column changes.
    async fn update_product_price(&self, id: ProductId, price: f32) -> DbResult<()>;

    /// Returns true when the backing store answers.
    async fn health_check(&self) -> bool {
        true
    }
}
