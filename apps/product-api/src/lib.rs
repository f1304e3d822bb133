//! # Product API
//!
//! REST front end for the product catalogue.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product API                                      │
//! │                                                                         │
//! │  HTTP ──► handlers ──► ProductService ──► ProductRepository ──► PG     │
//! │            │              │                                             │
//! │            │              └── discount validation                       │
//! │            └── parse path/query/body, map errors to status codes       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config`]):
//! - `PRODUCT_APP_SERVER__HOST` / `PRODUCT_APP_SERVER__PORT` - listener (default: localhost:8080)
//! - `PRODUCT_APP_DATABASE__*` - PostgreSQL connection and pool settings
//! - `RUST_LOG` - log filter (default: info)

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use axum::{routing::get, Router};

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use services::{ProductService, ServiceError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(products: ProductService) -> Self {
        AppState { products }
    }
}

/// Builds the HTTP router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            handlers::PRODUCTS_PATH,
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/v1/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_price)
                .delete(handlers::delete_product),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
