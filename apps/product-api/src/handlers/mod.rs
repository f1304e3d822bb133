//! HTTP handlers.

pub mod health;
pub mod product;

pub use health::health;
pub use product::{
    create_product, delete_product, get_product, list_products, update_price, ProductResponse,
    PRODUCTS_PATH,
};
