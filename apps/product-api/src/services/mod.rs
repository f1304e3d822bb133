//! # Service Layer
//!
//! Business rules between the HTTP handlers and the repository.

pub mod product_service;

pub use product_service::ProductService;

use product_core::ValidationError;
use product_db::DbError;

/// Service errors.
///
/// Both variants are transparent so callers see the underlying message
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] DbError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repository(e) if e.is_not_found())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
