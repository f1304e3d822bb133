//! Router tests over the in-memory repository.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use product_api::{app, error::ErrorResponse, handlers::ProductResponse, AppState, ProductService};
use product_core::{Product, ProductId};
use product_db::{DbError, DbResult, InMemoryProductRepository, ProductRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

fn product(id: i32, name: &str, price: f32, discount: f32, store: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        discount,
        store: store.to_string(),
    }
}

fn seeded_app() -> Router {
    let repo = InMemoryProductRepository::with_products(vec![
        product(1, "air", 3000.0, 22.0, "ABC TECH"),
        product(2, "iron", 1500.0, 10.0, "ABC TECH"),
        product(3, "fax", 10000.0, 15.0, "ABC TECH"),
        product(4, "phone", 2000.0, 0.0, "x brand"),
    ]);
    app(AppState::new(ProductService::new(Arc::new(repo))))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

fn description(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body).unwrap().description
}

#[tokio::test]
async fn test_list_all_products() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(
        products.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[tokio::test]
async fn test_list_by_store() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products?store=ABC%20TECH", None).await;
    assert_eq!(status, StatusCode::OK);
    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|p| p.store == "ABC TECH"));

    // Empty filter means no filter
    let (_, _, body) = send(&app, Method::GET, "/api/v1/products?store=", None).await;
    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 4);

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products?store=nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn test_get_product() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({"id": 1, "name": "air", "price": 3000.0, "discount": 22.0, "store": "ABC TECH"})
    );
}

#[tokio::test]
async fn test_get_product_not_found() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products/100", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(description(&body), "Product with id 100 not found");
}

#[tokio::test]
async fn test_get_product_bad_id() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(description(&body).starts_with("Invalid id 'abc'"));
}

#[tokio::test]
async fn test_create_product() {
    let app = seeded_app();

    let (status, headers, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "laptop", "price": 50000.0, "discount": 10.0, "store": "ABC TECH"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_empty());
    assert_eq!(headers[header::LOCATION], "/api/v1/products/5");

    let (status, _, body) = send(&app, Method::GET, "/api/v1/products/5", None).await;
    assert_eq!(status, StatusCode::OK);
    let created: ProductResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.name, "laptop");
    assert_eq!(created.discount, 10.0);
}

#[tokio::test]
async fn test_create_product_discount_out_of_range() {
    let app = seeded_app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "laptop", "price": 50000.0, "discount": 80.0, "store": "ABC TECH"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(description(&body), "Discount should be between 0 and 70");

    let (_, _, body) = send(&app, Method::GET, "/api/v1/products", None).await;
    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 4);
}

#[tokio::test]
async fn test_create_product_malformed_body() {
    let app = seeded_app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "laptop", "price": "a lot"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!description(&body).is_empty());
}

#[tokio::test]
async fn test_update_price() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::PUT, "/api/v1/products/1?price=4000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (_, _, body) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    let updated: ProductResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.price, 4000.0);
    assert_eq!(updated.discount, 22.0);
}

#[tokio::test]
async fn test_update_price_bad_input() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::PUT, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(description(&body), "Id and price parameters are required");

    let (status, _, body) = send(&app, Method::PUT, "/api/v1/products/1?price=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(description(&body), "Id and price parameters are required");

    let (status, _, body) = send(&app, Method::PUT, "/api/v1/products/1?price=cheap", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(description(&body).starts_with("Invalid price 'cheap'"));

    let (status, _, body) = send(&app, Method::PUT, "/api/v1/products/100?price=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(description(&body), "Product with id 100 not found");
}

#[tokio::test]
async fn test_update_price_rejects_non_finite() {
    let app = seeded_app();

    for raw in ["NaN", "inf", "infinity", "-inf"] {
        let uri = format!("/api/v1/products/1?price={}", raw);
        let (status, _, body) = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", raw);
        assert!(description(&body).starts_with("Invalid price"));
    }

    let (_, _, body) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    let product: ProductResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(product.price, 3000.0);
}

#[tokio::test]
async fn test_extractor_rejections_are_json() {
    let app = seeded_app();

    for (method, uri) in [
        (Method::PUT, "/api/v1/products/1?price=1&price=2"),
        (Method::GET, "/api/v1/products?store=a&store=b"),
        (Method::GET, "/api/v1/products/%FF"),
        (Method::PUT, "/api/v1/products/%FF?price=1"),
        (Method::DELETE, "/api/v1/products/%FF"),
    ] {
        let (status, headers, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json", "{}", uri);
        assert!(!description(&body).is_empty(), "{}", uri);
    }
}

#[tokio::test]
async fn test_delete_product() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _, _) = send(&app, Method::GET, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(&app, Method::DELETE, "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(description(&body), "Product with id 1 not found");

    let (_, _, body) = send(&app, Method::GET, "/api/v1/products", None).await;
    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_health() {
    let app = seeded_app();

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

// =============================================================================
// Persistence failures
// =============================================================================

/// Repository whose every call fails as if the database were down.
struct UnavailableRepository;

fn unavailable() -> DbError {
    DbError::ConnectionFailed("connection refused (os error 111)".to_string())
}

#[async_trait]
impl ProductRepository for UnavailableRepository {
    async fn add(&self, _product: &Product) -> DbResult<Product> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: ProductId) -> DbResult<Product> {
        Err(unavailable())
    }

    async fn get_all(&self) -> DbResult<Vec<Product>> {
        Err(unavailable())
    }

    async fn get_all_by_store(&self, _store: &str) -> DbResult<Vec<Product>> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: ProductId) -> DbResult<()> {
        Err(unavailable())
    }

    async fn update_product_price(&self, _id: ProductId, _price: f32) -> DbResult<()> {
        Err(unavailable())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn unavailable_app() -> Router {
    app(AppState::new(ProductService::new(Arc::new(UnavailableRepository))))
}

#[tokio::test]
async fn test_read_persistence_errors_are_500_and_generic() {
    let app = unavailable_app();

    for uri in ["/api/v1/products", "/api/v1/products?store=ABC%20TECH", "/api/v1/products/1"] {
        let (status, _, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(description(&body), "Database operation failed");
    }
}

#[tokio::test]
async fn test_write_persistence_errors_are_400_and_generic() {
    let app = unavailable_app();

    for (method, uri, body) in [
        (
            Method::POST,
            "/api/v1/products",
            Some(json!({"name": "air", "price": 3000.0, "discount": 22.0, "store": "ABC TECH"})),
        ),
        (Method::PUT, "/api/v1/products/1?price=10", None),
        (Method::DELETE, "/api/v1/products/1", None),
    ] {
        let (status, _, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(description(&body), "Database operation failed");
    }
}

#[tokio::test]
async fn test_validation_runs_before_persistence() {
    let app = unavailable_app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "air", "price": 3000.0, "discount": 71.0, "store": "ABC TECH"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(description(&body), "Discount should be between 0 and 70");
}

#[tokio::test]
async fn test_health_unavailable() {
    let app = unavailable_app();

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"database unavailable");
}
