//! HTTP-level tests for the product service over an in-memory repository.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppResult, Cache};
use domain::{cache_keys, CreateProduct, Product, UpdateProduct};
use product_service_lib::create_router;
use product_service_lib::repository::ProductRepository;
use product_service_lib::service::ProductManager;
use product_service_lib::state::AppState;

#[derive(Default)]
struct FakeRepository {
    rows: Mutex<Vec<Product>>,
    list_calls: Mutex<usize>,
}

#[async_trait]
impl ProductRepository for FakeRepository {
    async fn list(&self, category: Option<String>) -> AppResult<Vec<Product>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.is_none() || p.category == category)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> AppResult<Product> {
        let mut rows = self.rows.lock().unwrap();
        let product = Product {
            id: rows.len() as i32 + 1,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, changes: UpdateProduct) -> AppResult<Option<Product>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(product) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(category) = changes.category {
            product.category = Some(category);
        }
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

fn app() -> (Router, Arc<FakeRepository>, Cache) {
    let repo = Arc::new(FakeRepository::default());
    let cache = Cache::memory();
    let service = Arc::new(ProductManager::new(repo.clone(), cache.clone()));
    (create_router(AppState::new(service), 60), repo, cache)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_reports_service_name() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "product-service");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_crud_round_trip() {
    let (app, _, _) = app();

    let (status, created) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Laptop", "price": 999.99, "category": "electronics"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Laptop");
    assert!(created["description"].is_null());
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 999.99);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{}", id),
        Some(json!({"price": 899.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 899.0);
    assert_eq!(updated["name"], "Laptop");

    let (_, body) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(body["price"], 899.0);

    let (status, _) = send(&app, "DELETE", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Product not found");

    let (status, _) = send(&app, "DELETE", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_filter_and_list_cache() {
    let (app, repo, cache) = app();

    for (name, category) in [("Desk", "furniture"), ("Chair", "furniture"), ("Pen", "office")] {
        send(
            &app,
            "POST",
            "/products",
            Some(json!({"name": name, "price": 10.0, "category": category})),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/products?category=furniture", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/products?category=furniture", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(*repo.list_calls.lock().unwrap(), 1);
    assert!(cache
        .get::<Vec<Product>>(&cache_keys::products_by_category("furniture"))
        .await
        .is_some());

    // A new furniture item drops the cached furniture list
    send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Lamp", "price": 25.0, "category": "furniture"})),
    )
    .await;
    let (_, body) = send(&app, "GET", "/products?category=furniture", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_bad_input_is_rejected() {
    let (app, _, _) = app();

    let (status, body) = send(&app, "GET", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid ID");

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "Freebie", "price": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({"name": "", "price": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", "/products/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No fields to update");
}
