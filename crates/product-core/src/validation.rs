//! # Validation Module
//!
//! The one business rule: a product is created with a discount in
//! [`MIN_DISCOUNT`, `MAX_DISCOUNT`], bounds included.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP controller                                              │
//! │  └── JSON shape, path/query parsing (400 on failure)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductService::add                                          │
//! │  └── THIS MODULE: discount range                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: PostgreSQL                                                   │
//! │  └── NOT NULL constraints                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Price updates skip this module entirely.

use crate::error::ValidationError;
use crate::types::CreateProduct;
use crate::{MAX_DISCOUNT, MIN_DISCOUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a discount percentage.
///
/// NaN never satisfies the range check and is rejected.
///
/// ## Example
/// ```rust
/// use product_core::validation::validate_discount;
///
/// assert!(validate_discount(0.0).is_ok());
/// assert!(validate_discount(70.0).is_ok());
/// assert!(validate_discount(80.0).is_err());
/// ```
pub fn validate_discount(discount: f32) -> ValidationResult<()> {
    if (MIN_DISCOUNT..=MAX_DISCOUNT).contains(&discount) {
        Ok(())
    } else {
        Err(ValidationError::DiscountOutOfRange {
            min: MIN_DISCOUNT,
            max: MAX_DISCOUNT,
        })
    }
}

/// Validates a creation request.
pub fn validate_create_product(request: &CreateProduct) -> ValidationResult<()> {
    validate_discount(request.discount)
}
