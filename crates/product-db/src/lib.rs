//! # product-db: Database Layer for the Product App
//!
//! PostgreSQL access through sqlx, plus an in-memory repository with the
//! same contract for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product App Data Flow                            │
//! │                                                                         │
//! │  ProductService (product-api)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     product-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ PgPool        │◄───│  trait        │    │ 001_create_  │  │   │
//! │  │   │ Connection    │    │ Pg / InMemory │    │  products    │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              PostgreSQL: products(id, name, price, ...)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository trait and implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use product_db::{Database, DbConfig, ProductRepository};
//!
//! let config = DbConfig::new("localhost", "productapp").port(6432);
//! let db = Database::new(config).await?;
//!
//! let products = db.products().get_all_by_store("ABC TECH").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{InMemoryProductRepository, PgProductRepository, ProductRepository};
