//! Wire types of the inventory service.
//!
//! Every request and response is wrapped in a JSON:API style envelope:
//!
//! ```json
//! {"data": {"id": "1", "type": "inventarios",
//!           "attributes": {"productoId": 1, "cantidadDisponible": 10}}}
//! ```
//!
//! Decoding is lenient: every field is optional and unknown fields are
//! ignored, so partially-populated answers can still be inspected by the
//! validation helpers instead of failing at the serde layer.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ProductId;

/// Resource type tag used in every envelope.
pub const RESOURCE_TYPE: &str = "inventarios";

/// Attributes of an inventory record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAttributes {
    #[serde(
        rename = "productoId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<ProductId>,

    #[serde(
        rename = "cantidadDisponible",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity_available: Option<i32>,

    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An inventory record as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<InventoryAttributes>,
}

impl InventoryRecord {
    /// Builds a fully-populated record.
    pub fn new(id: impl Into<String>, product_id: ProductId, quantity: i32) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(RESOURCE_TYPE.to_string()),
            attributes: Some(InventoryAttributes {
                product_id: Some(product_id),
                quantity_available: Some(quantity),
                updated_at: None,
            }),
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.attributes.as_ref().and_then(|a| a.product_id)
    }

    pub fn quantity_available(&self) -> Option<i32> {
        self.attributes.as_ref().and_then(|a| a.quantity_available)
    }
}

/// Single-record response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub data: Option<InventoryRecord>,
}

/// List response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryListResponse {
    #[serde(default)]
    pub data: Option<Vec<InventoryRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RequestData<A> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: A,
}

/// Body of the create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRequest {
    data: RequestData<InventoryAttributes>,
}

impl InventoryRequest {
    pub fn new(product_id: ProductId, quantity: i32) -> Self {
        Self {
            data: RequestData {
                kind: RESOURCE_TYPE,
                attributes: InventoryAttributes {
                    product_id: Some(product_id),
                    quantity_available: Some(quantity),
                    updated_at: None,
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct BulkFetchAttributes {
    #[serde(rename = "productoIds")]
    product_ids: Vec<ProductId>,
}

/// Body of the bulk lookup call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFetchRequest {
    data: RequestData<BulkFetchAttributes>,
}

impl BulkFetchRequest {
    pub fn new(product_ids: &[ProductId]) -> Self {
        Self {
            data: RequestData {
                kind: RESOURCE_TYPE,
                attributes: BulkFetchAttributes {
                    product_ids: product_ids.to_vec(),
                },
            },
        }
    }
}

/// Accepts string or numeric identifiers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// Accepts RFC 3339 or zone-less ISO timestamps; anything else reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.and_utc()))
}
