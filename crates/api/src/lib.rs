//! HTTP API server for the product catalog.
//!
//! Provides REST endpoints for products whose quantities live in the remote
//! inventory service, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use catalog::{InMemoryProductStore, ProductStore};
use inventory::{InMemoryInventoryGateway, InventoryGateway};
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{ProductCatalog, ProductOrchestrator};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::products::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, G>(state: Arc<AppState<S, G>>, metrics_handle: PrometheusHandle) -> Router
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/v1/products",
            get(routes::products::list::<S, G>).post(routes::products::create::<S, G>),
        )
        .route(
            "/api/v1/products/{id}",
            get(routes::products::get::<S, G>)
                .put(routes::products::update::<S, G>)
                .delete(routes::products::delete::<S, G>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the orchestrator and the read paths over one store and one gateway.
pub fn create_state<S, G>(store: S, inventory: G) -> Arc<AppState<S, G>>
where
    S: ProductStore + Clone,
    G: InventoryGateway + Clone,
{
    Arc::new(AppState {
        orchestrator: ProductOrchestrator::new(store.clone(), inventory.clone()),
        catalog: ProductCatalog::new(store, inventory),
    })
}

/// Creates application state backed entirely by in-memory doubles.
///
/// The store and gateway handles share state with the returned app state.
pub fn create_default_state() -> (
    Arc<AppState<InMemoryProductStore, InMemoryInventoryGateway>>,
    InMemoryProductStore,
    InMemoryInventoryGateway,
) {
    let store = InMemoryProductStore::new();
    let inventory = InMemoryInventoryGateway::new();
    let state = create_state(store.clone(), inventory.clone());
    (state, store, inventory)
}
