use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Failure of a category query
///
/// Either variant aborts the whole query; no partial results are returned.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Key enumeration or a value fetch failed
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
    /// A stored value is not a valid record
    #[error("failed to decode value at '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for the category endpoints
///
/// Callers only ever see a plain-text 500; the underlying cause is logged.
#[derive(Debug)]
pub enum ApiError {
    /// Reading records from the store failed
    Fetch(QueryError),
    /// Serializing the response body failed
    Encode(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Fetch(err) => {
                tracing::error!("Failed to fetch records: {}", err);
                "failed to fetch data"
            }
            ApiError::Encode(err) => {
                tracing::error!("Failed to encode records: {}", err);
                "failed to encode data"
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Fetch(err)
    }
}
