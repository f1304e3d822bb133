//! # product-core: Pure Domain Logic for the Product App
//!
//! Entity types and the single creation rule (discount range). Nothing in
//! this crate touches the network, the database or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product App Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 product-api (axum controller)                   │   │
//! │  │   GET/POST/PUT/DELETE /api/v1/products ──► ProductService       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ product-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │     ┌───────────────┐   ┌───────────────┐   ┌─────────────┐    │   │
//! │  │     │     types     │   │  validation   │   │    error    │    │   │
//! │  │     │ Product       │   │ discount      │   │ Validation  │    │   │
//! │  │     │ CreateProduct │   │ range [0, 70] │   │ Error       │    │   │
//! │  │     └───────────────┘   └───────────────┘   └─────────────┘    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 product-db (PostgreSQL via sqlx)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CreateProduct)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use product_core::{validation::validate_create_product, CreateProduct};
//!
//! let request = CreateProduct {
//!     name: "air".to_string(),
//!     price: 3000.0,
//!     discount: 22.0,
//!     store: "ABC TECH".to_string(),
//! };
//!
//! validate_create_product(&request).unwrap();
//! let product = request.into_product();
//! assert_eq!(product.id, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest discount (percent) a product can be created with.
pub const MIN_DISCOUNT: f32 = 0.0;

/// Highest discount (percent) a product can be created with.
///
/// Only enforced on creation; price updates never look at the discount.
pub const MAX_DISCOUNT: f32 = 70.0;
