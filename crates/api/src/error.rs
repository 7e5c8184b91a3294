//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inventory::InventoryError;
use saga::{ErrorKind, SagaError};
use serde_json::{Value, json};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is malformed or fails validation.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Saga(#[from] SagaError),
}

/// One status per error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::RemoteInventoryFailure => StatusCode::BAD_GATEWAY,
        ErrorKind::InvalidRemoteResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PersistenceConflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Saga(err) => status_for(err.kind()),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Saga(err) => err.kind().as_str(),
        }
    }

    /// The inventory service's own error document, when it sent JSON.
    fn upstream(&self) -> Option<Value> {
        match self {
            ApiError::Saga(SagaError::Inventory(err @ InventoryError::RemoteFailure { .. })) => {
                err.body().and_then(|body| serde_json::from_str(body).ok())
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, kind = self.kind_name(), "request failed");
        }

        let mut body = json!({ "error": message, "kind": self.kind_name() });
        if let Some(upstream) = self.upstream() {
            body["upstream"] = upstream;
        }
        (status, axum::Json(body)).into_response()
    }
}
