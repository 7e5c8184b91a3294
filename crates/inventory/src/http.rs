//! HTTP implementation of the inventory gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::record::{BulkFetchRequest, InventoryRequest};
use crate::retry::RetryPolicy;
use crate::validation::{decode_created, decode_list, ensure_success};
use crate::{InventoryError, InventoryGateway, InventoryRecord, ProductId, Result};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-KEY";

const INVENTORY_PATH: &str = "inventarios";
const BULK_FETCH_PATH: &str = "inventarios/buscar";

/// Connection settings for the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Base URL, e.g. `http://localhost:8082/api/v1/`.
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for inventory creation.
    pub retry: RetryPolicy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082/api/v1/".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl InventoryConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Inventory gateway over HTTP/JSON.
///
/// Every request carries the API key and JSON content headers. Creation is
/// retried per the configured `RetryPolicy`; the other calls are single
/// attempts.
#[derive(Debug, Clone)]
pub struct HttpInventoryGateway {
    client: Client,
    config: InventoryConfig,
}

impl HttpInventoryGateway {
    pub fn new(config: InventoryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| InventoryError::Configuration(format!("invalid API key: {e}")))?;
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InventoryError::Configuration(e.to_string()))?;

        tracing::info!(base_url = %config.base_url, "inventory gateway configured");
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    async fn post_create(&self, url: &str, body: &InventoryRequest, attempt: u32) -> Result<String> {
        metrics::counter!("inventory_requests_total", "operation" => "create").increment(1);
        tracing::debug!(attempt, "sending inventory create request");

        let result = async {
            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(InventoryError::transport)?;
            let response = ensure_success(response).await?;
            response.text().await.map_err(InventoryError::transport)
        }
        .await;

        if result.is_err() {
            metrics::counter!("inventory_request_failures_total", "operation" => "create")
                .increment(1);
        }
        result
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    #[tracing::instrument(skip(self))]
    async fn create(&self, product_id: ProductId, quantity: i32) -> Result<InventoryRecord> {
        let url = self.config.url(INVENTORY_PATH);
        let body = InventoryRequest::new(product_id, quantity);
        let retry = self.config.retry;

        let text = retry
            .run("create", |attempt| self.post_create(&url, &body, attempt))
            .await
            .map_err(|e| {
                e.with_context(format!(
                    "Failed to create inventory for product {product_id} after {} attempts",
                    retry.attempts()
                ))
            })?;

        // any 2xx ends the retry loop; a bad body is not retried
        let record = decode_created(&text)?;
        tracing::info!(inventory_id = ?record.id, "inventory created");
        Ok(record)
    }

    #[tracing::instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    async fn bulk_fetch(&self, product_ids: &[ProductId]) -> Result<Vec<InventoryRecord>> {
        metrics::counter!("inventory_requests_total", "operation" => "bulk_fetch").increment(1);

        let result = async {
            let response = self
                .client
                .post(self.config.url(BULK_FETCH_PATH))
                .json(&BulkFetchRequest::new(product_ids))
                .send()
                .await
                .map_err(InventoryError::transport)?;
            let response = ensure_success(response).await?;
            let text = response.text().await.map_err(InventoryError::transport)?;
            decode_list(&text)
        }
        .await;

        match &result {
            Ok(records) => tracing::debug!(records = records.len(), "inventory fetched"),
            Err(e) => {
                metrics::counter!("inventory_request_failures_total", "operation" => "bulk_fetch")
                    .increment(1);
                tracing::warn!(error = %e, "inventory lookup failed");
            }
        }
        result
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, product_id: ProductId, quantity: i32) -> Result<()> {
        metrics::counter!("inventory_requests_total", "operation" => "update").increment(1);
        let url = self.config.url(INVENTORY_PATH);

        let result = async {
            let response = self
                .client
                .put(url)
                .json(&InventoryRequest::new(product_id, quantity))
                .send()
                .await
                .map_err(InventoryError::transport)?;
            ensure_success(response).await.map(|_| ())
        }
        .await;

        match &result {
            Ok(()) => tracing::info!(quantity, "inventory quantity updated"),
            Err(e) => {
                metrics::counter!("inventory_request_failures_total", "operation" => "update")
                    .increment(1);
                tracing::warn!(error = %e, "inventory update failed");
            }
        }
        result
    }
}
