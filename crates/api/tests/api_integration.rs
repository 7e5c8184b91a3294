//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::{InMemoryProductStore, NewProduct, ProductId, ProductStore};
use inventory::InMemoryInventoryGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (Router, InMemoryProductStore, InMemoryInventoryGateway) {
    let (state, store, inventory) = api::create_default_state();
    let app = api::create_app(state, get_metrics_handle());
    (app, store, inventory)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

fn laptop() -> Value {
    json!({
        "name": "Laptop",
        "description": "Laptop gaming",
        "price": "1500.00",
        "category": "Electronics",
        "quantity": 10
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _, _) = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_product() {
    let (app, store, inventory) = setup();

    let (status, json) = send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &json["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["name"], "Laptop");
    assert_eq!(data["price"], "1500.00");
    assert_eq!(data["category"], "Electronics");
    assert_eq!(data["quantity"], 10);

    assert_eq!(inventory.create_calls(), vec![(ProductId::new(1), 10)]);
    assert_eq!(store.product_count().await, 1);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (app, _, inventory) = setup();

    for body in [
        json!({"name": "  ", "price": "1.00", "quantity": 1}),
        json!({"name": "Mouse", "price": "-1.00", "quantity": 1}),
        json!({"name": "Mouse", "price": "1.00"}),
    ] {
        let (status, json) = send(&app, "POST", "/api/v1/products", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "bad_request");
    }
    assert_eq!(inventory.call_count(), 0);
}

#[tokio::test]
async fn test_create_duplicate_name_is_conflict() {
    let (app, _, inventory) = setup();
    send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    let (status, json) = send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["kind"], "persistence_conflict");
    assert_eq!(inventory.create_calls().len(), 1);
}

#[tokio::test]
async fn test_create_store_failure_is_internal() {
    let (app, store, inventory) = setup();
    store.set_fail_on_write(true);

    let (status, json) = send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["kind"], "internal");
    assert_eq!(inventory.call_count(), 0);
}

#[tokio::test]
async fn test_create_inventory_failure_is_bad_gateway() {
    let (app, store, inventory) = setup();
    inventory.set_fail_on_create(true);

    let (status, json) = send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["kind"], "remote_inventory_failure");
    // the product row is kept without inventory
    assert_eq!(store.product_count().await, 1);
}

#[tokio::test]
async fn test_create_invalid_inventory_response_is_bad_gateway() {
    let (app, _, inventory) = setup();
    inventory.set_omit_created_id(true);

    let (status, json) = send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["kind"], "invalid_remote_response");
}

#[tokio::test]
async fn test_get_product() {
    let (app, _, _) = setup();
    send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    let (status, json) = send(&app, "GET", "/api/v1/products/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Laptop");
    assert_eq!(json["data"]["quantity"], 10);
}

#[tokio::test]
async fn test_get_nonexistent_product() {
    let (app, _, inventory) = setup();

    let (status, json) = send(&app, "GET", "/api/v1/products/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["kind"], "not_found");
    assert_eq!(json["error"], "Product not found with id: 99");
    assert_eq!(inventory.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_product_id() {
    let (app, _, _) = setup();

    let (status, json) = send(&app, "GET", "/api/v1/products/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "bad_request");
}

#[tokio::test]
async fn test_list_products_with_filter_and_order() {
    let (app, _, inventory) = setup();
    for (name, category, quantity) in [
        ("Mouse", "Tech", 5),
        ("Chair", "Furniture", 2),
        ("Keyboard", "Tech", 0),
    ] {
        let body = json!({"name": name, "price": "10.00", "category": category, "quantity": quantity});
        let (status, _) = send(&app, "POST", "/api/v1/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let lookups_before = inventory.fetch_calls().len();

    let (status, json) = send(&app, "GET", "/api/v1/products?category=Tech&order=desc", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    let names: Vec<_> = data.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Keyboard", "Mouse"]);
    assert_eq!(data[0]["quantity"], 0);
    assert_eq!(data[1]["quantity"], 5);
    assert_eq!(inventory.fetch_calls().len(), lookups_before + 1);
}

#[tokio::test]
async fn test_list_reports_missing_inventory_as_null() {
    let (app, store, _) = setup();
    store
        .insert(NewProduct::new("Orphan", Decimal::ONE))
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/api/v1/products", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["data"][0]["quantity"].is_null());
}

#[tokio::test]
async fn test_update_product() {
    let (app, _, inventory) = setup();
    send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    let (status, json) = send(
        &app,
        "PUT",
        "/api/v1/products/1",
        Some(json!({"price": "1299.99", "quantity": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["price"], "1299.99");
    assert_eq!(json["data"]["name"], "Laptop");
    assert!(inventory.update_calls().is_empty());

    let (status, json) = send(
        &app,
        "PUT",
        "/api/v1/products/1",
        Some(json!({"quantity": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["quantity"], 20);
    assert_eq!(inventory.update_calls(), vec![(ProductId::new(1), 20)]);
}

#[tokio::test]
async fn test_update_nonexistent_product() {
    let (app, _, inventory) = setup();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/products/5",
        Some(json!({"quantity": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(inventory.call_count(), 0);
}

#[tokio::test]
async fn test_delete_product() {
    let (app, _, inventory) = setup();
    send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    let (status, _) = send(&app, "DELETE", "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/v1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // inventory is not touched by deletion
    assert_eq!(inventory.quantity_of(ProductId::new(1)), Some(10));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _, _) = setup();
    send(&app, "POST", "/api/v1/products", Some(laptop())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("saga_executions_total"));
}
