//! # Domain Types
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                      ┌─────────────────┐          │
//! │  │  CreateProduct  │  validate + into ──► │    Product      │          │
//! │  │  ─────────────  │                      │  ─────────────  │          │
//! │  │  name           │                      │  id (SERIAL)    │          │
//! │  │  price          │                      │  name           │          │
//! │  │  discount       │                      │  price          │          │
//! │  │  store          │                      │  discount       │          │
//! │  └─────────────────┘                      │  store          │          │
//! │                                           └─────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `id` is assigned by the database on insert and never changes afterwards.
//! `store` is a plain grouping key, not a reference to another table.

use serde::{Deserialize, Serialize};

/// Identifier type of a persisted product (`SERIAL` column).
pub type ProductId = i32;

/// Identifier carried by a product that has not been persisted yet.
pub const UNASSIGNED_ID: ProductId = 0;

// =============================================================================
// Product
// =============================================================================

/// A persisted product.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Database-assigned identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price. Expected non-negative, never validated.
    pub price: f32,

    /// Discount percentage, within [0, 70] at creation time.
    pub discount: f32,

    /// Store the product is listed under.
    pub store: String,
}

// =============================================================================
// CreateProduct
// =============================================================================

/// Creation input: a product without its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

impl CreateProduct {
    /// Builds the entity to insert. The identifier stays unassigned.
    pub fn into_product(self) -> Product {
        Product {
            id: UNASSIGNED_ID,
            name: self.name,
            price: self.price,
            discount: self.discount,
            store: self.store,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> CreateProduct {
        CreateProduct {
            name: "laptop".to_string(),
            price: 50000.0,
            discount: 10.0,
            store: "ABC TECH".to_string(),
        }
    }

    #[test]
    fn test_into_product_leaves_id_unassigned() {
        let product = laptop().into_product();

        assert_eq!(product.id, UNASSIGNED_ID);
        assert_eq!(product.name, "laptop");
        assert_eq!(product.price, 50000.0);
        assert_eq!(product.discount, 10.0);
        assert_eq!(product.store, "ABC TECH");
    }

    #[test]
    fn test_create_product_deserializes_from_json() {
        let json = r#"{"name":"tv","price":5000.0,"discount":10.0,"store":"ABC TECH"}"#;
        let request: CreateProduct = serde_json::from_str(json).unwrap();

        assert_eq!(request.name, "tv");
        assert_eq!(request.store, "ABC TECH");
    }

    #[test]
    fn test_create_product_requires_every_field() {
        let json = r#"{"name":"tv","price":5000.0}"#;
        assert!(serde_json::from_str::<CreateProduct>(json).is_err());
    }
}
