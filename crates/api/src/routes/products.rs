//! Product CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{NewProduct, ProductChanges, ProductId, ProductQuery, ProductStore, SortOrder};
use inventory::InventoryGateway;
use rust_decimal::Decimal;
use saga::{ProductCatalog, ProductOrchestrator, ProductWithQuantity};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, G>
where
    S: ProductStore,
    G: InventoryGateway,
{
    pub orchestrator: ProductOrchestrator<S, G>,
    pub catalog: ProductCatalog<S, G>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
}

impl CreateProductRequest {
    fn validate(self) -> Result<(NewProduct, i32), ApiError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ApiError::BadRequest("name is required".to_string())),
        };
        let price = self
            .price
            .ok_or_else(|| ApiError::BadRequest("price is required".to_string()))?;
        ensure_non_negative(price)?;
        let quantity = self
            .quantity
            .ok_or_else(|| ApiError::BadRequest("quantity is required".to_string()))?;

        let mut product = NewProduct::new(name, price);
        product.description = self.description;
        product.category = self.category;
        Ok((product, quantity))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
}

impl UpdateProductRequest {
    fn validate(self) -> Result<ProductChanges, ApiError> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ApiError::BadRequest("name must not be blank".to_string()));
        }
        if let Some(price) = self.price {
            ensure_non_negative(price)?;
        }

        Ok(ProductChanges {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub order: Option<String>,
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        let mut query = ProductQuery::new();
        if let Some(category) = params.category {
            query = query.category(category);
        }
        if let Some(order) = params.order {
            query = query.order(SortOrder::parse(&order));
        }
        query
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

fn ensure_non_negative(price: Decimal) -> Result<(), ApiError> {
    if price < Decimal::ZERO {
        return Err(ApiError::BadRequest(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid product id: {e}")))
}

// -- Handlers --

/// POST /api/v1/products — persist a product and create its inventory record.
#[tracing::instrument(skip(state, req))]
pub async fn create<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<DataResponse<ProductWithQuantity>>), ApiError>
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let (product, quantity) = req.validate()?;
    let product = state
        .orchestrator
        .create_product_with_inventory(product, quantity)
        .await?;
    let product = state.catalog.with_quantity(product).await?;

    Ok((StatusCode::CREATED, DataResponse::new(product)))
}

/// GET /api/v1/products — list products with their quantities.
#[tracing::instrument(skip(state))]
pub async fn list<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<DataResponse<Vec<ProductWithQuantity>>>, ApiError>
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let products = state.catalog.list_products(params.into()).await?;
    Ok(DataResponse::new(products))
}

/// GET /api/v1/products/{id} — load one product with its quantity.
#[tracing::instrument(skip(state))]
pub async fn get<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<ProductWithQuantity>>, ApiError>
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let id = parse_product_id(&id)?;
    let product = state.catalog.get_product(id).await?;
    Ok(DataResponse::new(product))
}

/// PUT /api/v1/products/{id} — partial update, pushing a changed quantity
/// to the inventory service.
#[tracing::instrument(skip(state, req))]
pub async fn update<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<DataResponse<ProductWithQuantity>>, ApiError>
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let id = parse_product_id(&id)?;
    let changes = req.validate()?;
    let product = state
        .orchestrator
        .update_product_and_maybe_inventory(id, changes)
        .await?;
    Ok(DataResponse::new(product))
}

/// DELETE /api/v1/products/{id} — remove the local product row.
#[tracing::instrument(skip(state))]
pub async fn delete<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: ProductStore + 'static,
    G: InventoryGateway + 'static,
{
    let id = parse_product_id(&id)?;
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
