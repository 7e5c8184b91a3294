//! Application configuration loaded from environment variables.

use std::time::Duration;

use inventory::InventoryConfig;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `INVENTORY_API_URL` — inventory service base URL
///   (default: `"http://localhost:8082/api/v1/"`)
/// - `INVENTORY_API_KEY` — shared secret sent as `X-API-KEY` (default: empty)
/// - `INVENTORY_TIMEOUT_MS` — per-request timeout (default: `5000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub inventory_api_url: String,
    pub inventory_api_key: String,
    pub inventory_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            inventory_api_url: lookup("INVENTORY_API_URL").unwrap_or(defaults.inventory_api_url),
            inventory_api_key: lookup("INVENTORY_API_KEY").unwrap_or(defaults.inventory_api_key),
            inventory_timeout_ms: lookup("INVENTORY_TIMEOUT_MS")
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.inventory_timeout_ms),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the inventory gateway.
    pub fn inventory(&self) -> InventoryConfig {
        InventoryConfig::new(&self.inventory_api_url, &self.inventory_api_key)
            .with_timeout(Duration::from_millis(self.inventory_timeout_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            inventory_api_url: "http://localhost:8082/api/v1/".to_string(),
            inventory_api_key: String::new(),
            inventory_timeout_ms: 5000,
        }
    }
}
