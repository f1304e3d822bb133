//! # Error Types
//!
//! Domain-specific error types for product-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  product-core (this file)                                              │
//! │  └── ValidationError  - Creation input rejected                        │
//! │                                                                         │
//! │  product-db                                                            │
//! │  └── DbError          - Not found / persistence failures               │
//! │                                                                         │
//! │  product-api                                                           │
//! │  ├── ServiceError     - ValidationError | DbError                      │
//! │  └── ApiError         - What HTTP clients see                          │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → ApiError → {"description"}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// The display text is part of the HTTP contract: it is returned verbatim as
/// the `description` of a 400 response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Discount outside the allowed inclusive range.
    #[error("Discount should be between {min} and {max}")]
    DiscountOutOfRange { min: f32, max: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_DISCOUNT, MIN_DISCOUNT};

    #[test]
    fn test_discount_message_is_exact() {
        let err = ValidationError::DiscountOutOfRange {
            min: MIN_DISCOUNT,
            max: MAX_DISCOUNT,
        };
        assert_eq!(err.to_string(), "Discount should be between 0 and 70");
    }
}
