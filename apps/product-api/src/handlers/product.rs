//! # Product Handlers
//!
//! ```text
//! GET    /api/v1/products[?store=S]   → 200 [ProductResponse]
//! GET    /api/v1/products/{id}        → 200 ProductResponse
//! POST   /api/v1/products             → 201, Location: /api/v1/products/{id}
//! PUT    /api/v1/products/{id}?price= → 200
//! DELETE /api/v1/products/{id}        → 200
//! ```
//!
//! Path and query values arrive as strings and are parsed here. Extractor
//! rejections are converted too, so every 400 carries a JSON description.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use product_core::{CreateProduct, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Base path of the product resource.
pub const PRODUCTS_PATH: &str = "/api/v1/products";

// =============================================================================
// DTOs
// =============================================================================

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: f32,
    pub discount: f32,
    pub store: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            price: p.price,
            discount: p.discount,
            store: p.store,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub store: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    pub price: Option<String>,
}

// =============================================================================
// Parameter parsing
// =============================================================================

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::bad_request("Id parameter is required"));
    }
    raw.parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid id '{}': {}", raw, e)))
}

/// Accepts any finite float. NaN and infinities cannot be written back as JSON.
fn parse_price(raw: &str) -> Result<f32, ApiError> {
    let price: f32 = raw
        .trim()
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid price '{}': {}", raw, e)))?;

    if !price.is_finite() {
        return Err(ApiError::bad_request(format!(
            "Invalid price '{}': must be a finite number",
            raw
        )));
    }
    Ok(price)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Lists every product, or only those of one store when `store` is set.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let params = query(params)?;
    let products = match params.store.as_deref().filter(|s| !s.is_empty()) {
        Some(store) => state.products.get_all_by_store(store).await?,
        None => state.products.get_all().await?,
    };

    debug!(count = products.len(), "Listed products");
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = parse_id(&path_id(id)?)?;
    let product = state.products.get_by_id(id).await?;
    Ok(Json(product.into()))
}

/// Creates a product. Responds 201 with an empty body and a `Location`
/// header pointing at the new resource.
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let product = state
        .products
        .add(request)
        .await
        .map_err(ApiError::from_write)?;
    let location = format!("{}/{}", PRODUCTS_PATH, product.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

pub async fn update_price(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    let price = query(params)?.price.unwrap_or_default();
    if id.trim().is_empty() || price.trim().is_empty() {
        return Err(ApiError::bad_request("Id and price parameters are required"));
    }
    let id = parse_id(&id)?;
    let price = parse_price(&price)?;

    state
        .products
        .update_price(id, price)
        .await
        .map_err(ApiError::from_write)?;
    Ok(StatusCode::OK)
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&path_id(id)?)?;
    state
        .products
        .delete_by_id(id)
        .await
        .map_err(ApiError::from_write)?;
    Ok(StatusCode::OK)
}
