//! Gateway tests against stub product and inventory services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use common::Cache;
use domain::cache_keys;
use gateway_lib::config::GatewayConfig;
use gateway_lib::{build_state, create_router};

/// Request counters shared by the stub services.
#[derive(Clone, Default)]
struct Hits {
    product_reads: Arc<AtomicUsize>,
    list_reads: Arc<AtomicUsize>,
    inventory_reads: Arc<AtomicUsize>,
}

fn product_json(id: i32) -> Value {
    json!({
        "id": id,
        "name": format!("Product {}", id),
        "description": null,
        "price": 10.5,
        "category": "tools"
    })
}

async fn stub_list(State(hits): State<Hits>, RawQuery(query): RawQuery) -> Json<Value> {
    hits.list_reads.fetch_add(1, Ordering::SeqCst);
    // Echo the query so proxy tests can check it arrived intact
    let mut products = vec![product_json(1), product_json(2), product_json(3)];
    if let Some(query) = query {
        products[0]["echo_query"] = json!(query);
    }
    Json(json!(products))
}

async fn stub_product(State(hits): State<Hits>, Path(id): Path<i32>) -> Response {
    hits.product_reads.fetch_add(1, Ordering::SeqCst);
    if id <= 3 {
        Json(product_json(id)).into_response()
    } else if id == 503 {
        (StatusCode::SERVICE_UNAVAILABLE, "catalog under maintenance").into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Product not found"})),
        )
            .into_response()
    }
}

async fn stub_create(headers: HeaderMap, body: String) -> Response {
    let mut created: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    created["id"] = json!(99);
    created["saw_host"] = json!(headers
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default());
    created["saw_trace"] = json!(headers.contains_key("x-trace-id"));
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn stub_inventory(State(hits): State<Hits>, Path(product_id): Path<i32>) -> Response {
    hits.inventory_reads.fetch_add(1, Ordering::SeqCst);
    match product_id {
        1 => Json(json!({
            "id": 10,
            "product_id": 1,
            "quantity": 50,
            "warehouse": "Warehouse A",
            "last_updated": "2024-01-01T00:00:00Z"
        }))
        .into_response(),
        3 => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (StatusCode::NOT_FOUND, "Inventory not found for this product").into_response(),
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_product_service(hits: Hits) -> String {
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/products", get(stub_list).post(stub_create))
        .route("/products/:id", get(stub_product))
        .with_state(hits);
    spawn(app).await
}

async fn spawn_inventory_service(hits: Hits) -> String {
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/inventory/product/:product_id", get(stub_inventory))
        .with_state(hits);
    spawn(app).await
}

/// Address that refuses connections.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn gateway(product_url: String, inventory_url: String, cache: Cache) -> Router {
    let config = GatewayConfig {
        product_service_url: product_url,
        inventory_service_url: inventory_url,
        upstream_timeout_seconds: 5,
        ..GatewayConfig::default()
    };
    let state = build_state(&config, cache).unwrap();
    create_router(state, 30)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_product_with_inventory_is_merged_and_cached() {
    let hits = Hits::default();
    let cache = Cache::memory();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits.clone()).await,
        cache.clone(),
    );

    let (status, body) = send(&app, get_request("/api/products/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Product 1");
    assert_eq!(body["inventory"]["quantity"], 50);
    assert_eq!(body["inventory"]["warehouse"], "Warehouse A");
    assert!(body["inventory"].get("product_id").is_none());

    let (_, again) = send(&app, get_request("/api/products/1")).await;
    assert_eq!(again, body);
    assert_eq!(hits.product_reads.load(Ordering::SeqCst), 1);
    assert_eq!(hits.inventory_reads.load(Ordering::SeqCst), 1);

    // Dropping the key (as a service write does) forces a refetch
    cache
        .invalidate(&[cache_keys::gateway_product_full(1)])
        .await;
    send(&app, get_request("/api/products/1")).await;
    assert_eq!(hits.product_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_inventory_is_omitted() {
    let hits = Hits::default();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits.clone()).await,
        Cache::memory(),
    );

    let (status, body) = send(&app, get_request("/api/products/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert!(body.get("inventory").is_none());
}

#[tokio::test]
async fn test_product_not_found_is_passed_through() {
    let hits = Hits::default();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits.clone()).await,
        Cache::memory(),
    );

    let (status, body) = send(&app, get_request("/api/products/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Product not found");
    assert_eq!(hits.inventory_reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_product_error_keeps_upstream_content_type() {
    let hits = Hits::default();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits).await,
        Cache::memory(),
    );

    let response = app
        .clone()
        .oneshot(get_request("/api/products/503"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"catalog under maintenance");

    let response = app.oneshot(get_request("/api/products/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let app = gateway(dead_url().await, dead_url().await, Cache::memory());

    let (status, body) = send(&app, get_request("/api/products/1")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "BAD_GATEWAY");

    let (status, _) = send(&app, get_request("/api/inventory")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_products_full_uses_cache_unless_forced() {
    let hits = Hits::default();
    let cache = Cache::memory();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits.clone()).await,
        cache.clone(),
    );

    let (status, body) = send(&app, get_request("/api/products-full")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["inventory"]["quantity"], 50);
    assert!(items[1].get("inventory").is_none());
    // An upstream 500 for one product only drops its inventory
    assert!(items[2].get("inventory").is_none());
    assert_eq!(items[2]["id"], 3);

    send(&app, get_request("/api/products-full")).await;
    assert_eq!(hits.list_reads.load(Ordering::SeqCst), 1);

    send(&app, get_request("/api/products-full?force_refresh=true")).await;
    assert_eq!(hits.list_reads.load(Ordering::SeqCst), 2);
    assert!(cache
        .get::<Value>(cache_keys::GATEWAY_PRODUCTS_FULL_ALL)
        .await
        .is_some());

    // Anything other than the literal "true" reads the cache
    send(&app, get_request("/api/products-full?force_refresh=1")).await;
    assert_eq!(hits.list_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_proxy_strips_prefix_and_keeps_query() {
    let hits = Hits::default();
    let app = gateway(
        spawn_product_service(hits.clone()).await,
        spawn_inventory_service(hits.clone()).await,
        Cache::memory(),
    );

    let (status, body) = send(&app, get_request("/api/products?category=tools")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["echo_query"], "category=tools");

    let (status, body) = send(&app, get_request("/api/inventory/product/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product_id"], 1);

    let (status, body) = send(&app, get_request("/api/inventory/product/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("Inventory not found for this product"));
}

#[tokio::test]
async fn test_proxy_relays_body_and_headers() {
    let hits = Hits::default();
    let product_url = spawn_product_service(hits.clone()).await;
    let app = gateway(
        product_url.clone(),
        spawn_inventory_service(hits).await,
        Cache::memory(),
    );

    let request = Request::post("/api/products")
        .header("content-type", "application/json")
        .header("host", "gateway.example")
        .header("x-trace-id", "abc123")
        .body(Body::from(r#"{"name":"Drill","price":49.9}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 99);
    assert_eq!(body["name"], "Drill");
    assert_eq!(body["saw_trace"], true);
    // Host is rewritten for the upstream hop
    assert_eq!(body["saw_host"], product_url.trim_start_matches("http://"));
}

#[tokio::test]
async fn test_health_reports_downstream_status() {
    let hits = Hits::default();
    let app = gateway(
        spawn_product_service(hits).await,
        dead_url().await,
        Cache::memory(),
    );

    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "api-gateway");
    assert_eq!(body["downstream_services"]["product_service"], "healthy");
    assert_eq!(body["downstream_services"]["inventory_service"], "unhealthy");
}

#[tokio::test]
async fn test_invalid_product_id_is_rejected() {
    let app = gateway(dead_url().await, dead_url().await, Cache::memory());

    let (status, body) = send(&app, get_request("/api/products/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid ID");
}
