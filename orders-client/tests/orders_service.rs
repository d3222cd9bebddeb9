//! Orders workflow against an in-process mock orders service

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use orders_client::{
    ClientError, FileOrderCache, LoadOutcome, MemoryOrderCache, NetworkOrderClient, OrderApi,
    OrderCache, OrderService, OrderUpdate, OrdersConfig, OrdersTable, SaveOutcome,
};
use serde_json::{Value, json};
use shared::error::ErrorCode;
use shared::models::Order;
use std::sync::{Arc, Mutex};

const KEY: &str = "test-key";

#[derive(Clone, Default)]
struct MockState {
    orders: Arc<Mutex<Vec<Value>>>,
    reject_saves: bool,
}

type Reply = (StatusCode, Json<Value>);

fn authorized(headers: &HeaderMap) -> Result<(), Reply> {
    match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        Some(KEY) => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid API key"})),
        )),
    }
}

async fn list(State(state): State<MockState>, headers: HeaderMap) -> Reply {
    if let Err(reply) = authorized(&headers) {
        return reply;
    }
    let orders = state.orders.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(orders)))
}

async fn update(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if let Err(reply) = authorized(&headers) {
        return reply;
    }
    if state.reject_saves {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Status is not allowed"})),
        );
    }
    let mut orders = state.orders.lock().unwrap();
    let Some(order) = orders.iter_mut().find(|o| o["_id"] == id.as_str()) else {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    };
    if let (Value::Object(target), Value::Object(fields)) = (order, body) {
        target.extend(fields);
    }
    let saved = orders.iter().find(|o| o["_id"] == id.as_str()).cloned();
    (StatusCode::OK, Json(saved.unwrap_or_default()))
}

async fn spawn_mock(state: MockState) -> String {
    let app = Router::new()
        .route("/api/orders", get(list))
        .route("/api/orders/{id}", put(update))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn seed_orders() -> Vec<Value> {
    (1..=7)
        .map(|i| {
            json!({
                "_id": format!("o{}", i),
                "orderNumber": 1000 + i,
                "date": "2024-05-01",
                "items": "2",
                "amount": 99.5,
                "status": "Pending",
                "location": "Pune",
                "customerName": format!("Customer {}", i),
                "customerNumber": 9000000000u64 + i
            })
        })
        .collect()
}

fn complete_update(order: &Order) -> OrderUpdate {
    let mut update = order.to_update();
    update.status = "Delivered".into();
    update
}

fn client(base_url: &str, key: Option<&str>) -> NetworkOrderClient {
    let mut config = OrdersConfig::new(base_url).with_timeout(5);
    if let Some(key) = key {
        config = config.with_api_key(key);
    }
    NetworkOrderClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_load_fetches_and_caches() {
    let base = spawn_mock(MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        ..Default::default()
    })
    .await;
    let dir = tempfile::tempdir().unwrap();
    let cache = FileOrderCache::new(dir.path().join("orders.json"));

    let mut service = OrderService::new(client(&base, Some(KEY)), cache);
    let outcome = service.load().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Fresh);
    assert_eq!(service.orders().len(), 7);
    assert_eq!(service.orders()[0].order_number, "1001");
    assert_eq!(service.orders()[0].customer_number, "9000000001");
    assert_eq!(service.cache().load().await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_load_falls_back_to_cache_on_auth_failure() {
    let base = spawn_mock(MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        ..Default::default()
    })
    .await;
    let cached = vec![Order {
        id: "local".into(),
        order_number: "42".into(),
        ..Default::default()
    }];

    let mut service = OrderService::new(client(&base, None), MemoryOrderCache::new(cached));
    let outcome = service.load().await.unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Cached {
            reason: "Invalid API key".into()
        }
    );
    assert!(outcome.notice().is_some());
    assert_eq!(service.orders().len(), 1);
    assert_eq!(service.orders()[0].order_number, "42");
}

#[tokio::test]
async fn test_api_errors_surface_server_message() {
    let base = spawn_mock(MockState::default()).await;
    let err = client(&base, Some("wrong")).list_orders().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid API key");
}

#[tokio::test]
async fn test_save_merges_response_and_refetches() {
    let state = MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        ..Default::default()
    };
    let base = spawn_mock(state.clone()).await;
    let mut service = OrderService::new(client(&base, Some(KEY)), MemoryOrderCache::default());
    service.load().await.unwrap();

    let update = complete_update(&service.orders()[1]);
    let outcome = service.save("o2", &update).await.unwrap();
    assert!(outcome.is_remote());
    assert_eq!(outcome.order().status, "Delivered");
    assert_eq!(outcome.message(), "Order 1002 saved successfully");

    assert_eq!(service.orders()[1].status, "Delivered");
    assert_eq!(state.orders.lock().unwrap()[1]["status"], "Delivered");
    assert_eq!(service.cache().snapshot()[1].status, "Delivered");
}

#[tokio::test]
async fn test_rejected_save_is_kept_locally() {
    let base = spawn_mock(MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        reject_saves: true,
    })
    .await;
    let mut service = OrderService::new(client(&base, Some(KEY)), MemoryOrderCache::default());
    service.load().await.unwrap();

    let update = complete_update(&service.orders()[0]);
    let outcome = service.save("o1", &update).await.unwrap();
    assert!(!outcome.is_remote());
    assert_eq!(
        outcome.message(),
        "Failed to save to server: Status is not allowed. Saved locally."
    );
    assert_eq!(service.orders()[0].status, "Delivered");
    assert_eq!(service.cache().snapshot()[0].status, "Delivered");
    assert!(matches!(outcome, SaveOutcome::SavedLocally { .. }));
}

#[tokio::test]
async fn test_invalid_saves_change_nothing() {
    let base = spawn_mock(MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        ..Default::default()
    })
    .await;
    let mut service = OrderService::new(client(&base, Some(KEY)), MemoryOrderCache::default());
    service.load().await.unwrap();
    let before = service.orders().to_vec();

    let mut incomplete = complete_update(&before[0]);
    incomplete.location = " ".into();
    let err = service.save("o1", &incomplete).await.unwrap_err();
    match err {
        ClientError::App(app) => assert_eq!(app.code, ErrorCode::OrderFieldsIncomplete),
        other => panic!("unexpected error: {other}"),
    }

    let err = service.save("", &complete_update(&before[0])).await.unwrap_err();
    assert!(matches!(err, ClientError::App(ref app) if app.code == ErrorCode::RequiredField));

    let err = service.save("nope", &complete_update(&before[0])).await.unwrap_err();
    assert!(matches!(err, ClientError::App(ref app) if app.code == ErrorCode::OrderNotFound));

    assert_eq!(service.orders(), before.as_slice());
}

#[tokio::test]
async fn test_table_pages_loaded_orders() {
    let base = spawn_mock(MockState {
        orders: Arc::new(Mutex::new(seed_orders())),
        ..Default::default()
    })
    .await;
    let mut service = OrderService::new(client(&base, Some(KEY)), MemoryOrderCache::default());
    service.load().await.unwrap();

    let mut table = OrdersTable::default();
    table.set_orders(service.orders().to_vec());
    assert_eq!(table.page_count(), 2);
    assert!(table.set_page(2));
    assert_eq!(table.current_page_rows().len(), 2);

    table.set_search("1007");
    assert_eq!(table.page(), 1);
    assert_eq!(table.current_page_rows()[0].id, "o7");

    let buffer = table.begin_edit("o7").unwrap();
    buffer.status = "Shipped".into();
    let (id, update) = table.take_edit().unwrap();
    let outcome = service.save(&id, &update).await.unwrap();
    assert_eq!(outcome.order().status, "Shipped");
}
