use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use moviedb_auth::MessageResponse;
use moviedb_core::catalog::ValidationError;
use moviedb_core::storage::{store_error_to_status_code, StoreError};

use crate::engine::CatalogError;

/// Error returned by catalog handlers, rendered as `{"message": "..."}`.
///
/// Server faults carry a generic message; the cause is logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => Self::Validation(e),
            CatalogError::Store(e) => Self::Store(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => StatusCode::from_u16(store_error_to_status_code(e))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
