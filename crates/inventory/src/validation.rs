//! Response checks shared by the gateway operations.

use crate::record::{InventoryListResponse, InventoryRecord, InventoryResponse};
use crate::{InventoryError, Result};

/// Passes 2xx responses through; turns anything else into `RemoteFailure`
/// carrying the status and raw body.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.ok().filter(|body| !body.is_empty());
    Err(InventoryError::unexpected_status(status.as_u16(), body))
}

/// Decodes the body of a successful create call and checks that the service
/// actually assigned an identity.
pub fn decode_created(body: &str) -> Result<InventoryRecord> {
    if body.trim().is_empty() {
        return Err(InventoryError::InvalidResponse("empty body".to_string()));
    }

    let response: InventoryResponse = serde_json::from_str(body)
        .map_err(|e| InventoryError::InvalidResponse(format!("undecodable body: {e}")))?;

    let record = response
        .data
        .ok_or_else(|| InventoryError::InvalidResponse("missing data".to_string()))?;

    validate_created(record)
}

/// A created record must carry a non-empty id.
pub fn validate_created(record: InventoryRecord) -> Result<InventoryRecord> {
    match record.id.as_deref() {
        Some(id) if !id.trim().is_empty() => Ok(record),
        _ => Err(InventoryError::InvalidResponse(
            "missing identity".to_string(),
        )),
    }
}

/// Decodes a bulk lookup body. An empty body or a missing `data` member
/// reads as "no records".
pub fn decode_list(body: &str) -> Result<Vec<InventoryRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let response: InventoryListResponse = serde_json::from_str(body)
        .map_err(|e| InventoryError::InvalidResponse(format!("undecodable body: {e}")))?;

    Ok(response.data.unwrap_or_default())
}
