//! Scriptable stand-in for the inventory service.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use inventory::{HttpInventoryGateway, InventoryConfig, RetryPolicy};

pub const API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
    pub at: Instant,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct StubState {
    responses: VecDeque<(StatusCode, String)>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone)]
pub struct StubServer {
    pub addr: SocketAddr,
    state: Arc<Mutex<StubState>>,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1/", self.addr)
    }

    /// Queues a response; unscripted requests get a 500.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back((StatusCode::from_u16(status).unwrap(), body.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn gateway(&self) -> HttpInventoryGateway {
        HttpInventoryGateway::new(InventoryConfig::new(self.base_url(), API_KEY)).unwrap()
    }
}

async fn handle(
    State(state): State<Arc<Mutex<StubState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
        at: Instant::now(),
    });

    let (status, body) = state
        .responses
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, "no scripted response".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Gateway pointed at a port nothing listens on.
pub async fn unreachable_gateway() -> HttpInventoryGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = InventoryConfig::new(format!("http://{addr}/api/v1/"), API_KEY)
        .with_timeout(Duration::from_secs(2))
        .with_retry(RetryPolicy::default());
    HttpInventoryGateway::new(config).unwrap()
}

pub fn record_body(id: &str, product_id: i64, quantity: i32) -> String {
    serde_json::json!({
        "data": {
            "id": id,
            "type": "inventarios",
            "attributes": {"productoId": product_id, "cantidadDisponible": quantity}
        }
    })
    .to_string()
}
