//! # Product Service
//!
//! Validates creation requests and forwards everything else to the
//! repository untouched.
//!
//! ```text
//! handler ──► ProductService ──► Arc<dyn ProductRepository>
//!               │
//!               └── add: validate_create_product, then repository.add
//! ```

use std::sync::Arc;

use product_core::{validation::validate_create_product, CreateProduct, Product, ProductId};
use product_db::ProductRepository;

use super::ServiceResult;

/// Product use cases.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        ProductService { repository }
    }

    /// Validates and stores a new product, returning it with its id.
    ///
    /// Nothing reaches the repository when validation fails.
    pub async fn add(&self, request: CreateProduct) -> ServiceResult<Product> {
        validate_create_product(&request)?;
        Ok(self.repository.add(&request.into_product()).await?)
    }

    pub async fn update_price(&self, id: ProductId, price: f32) -> ServiceResult<()> {
        Ok(self.repository.update_product_price(id, price).await?)
    }

    pub async fn delete_by_id(&self, id: ProductId) -> ServiceResult<()> {
        Ok(self.repository.delete_by_id(id).await?)
    }

    pub async fn get_by_id(&self, id: ProductId) -> ServiceResult<Product> {
        Ok(self.repository.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repository.get_all().await?)
    }

    pub async fn get_all_by_store(&self, store: &str) -> ServiceResult<Vec<Product>> {
        Ok(self.repository.get_all_by_store(store).await?)
    }

    /// True when the repository's backing store answers.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
