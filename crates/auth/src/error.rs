use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Auth errors for the moviedb_auth crate.
///
/// Wraps the core `AuthError` and adds the failures of I/O that can't live
/// in the functional core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (token checks, provider rejections)
    #[error(transparent)]
    Core(#[from] moviedb_core::auth::AuthError),

    /// HTTP client error talking to the identity provider
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration or key material error
    #[error("configuration error: {0}")]
    Config(String),

    /// Request body could not be parsed
    #[error("{0}")]
    InvalidBody(String),

    /// No identity provider is configured
    #[error("identity provider not configured")]
    ProviderNotConfigured,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use moviedb_core::auth::AuthError as CoreError;

        let (status, message) = match &self {
            AuthError::Core(core_err) => match core_err {
                CoreError::NotAuthorized(msg) | CoreError::UserNotConfirmed(msg) => {
                    (StatusCode::UNAUTHORIZED, msg.clone())
                }
                CoreError::InvalidToken(_)
                | CoreError::TokenExpired
                | CoreError::MissingClaim(_) => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
                }
                CoreError::InvalidRequest { message, .. } => {
                    (StatusCode::BAD_REQUEST, message.clone())
                }
                CoreError::Provider(_) => {
                    tracing::error!("Identity provider error: {}", self);
                    (
                        StatusCode::BAD_GATEWAY,
                        "Authentication provider error".to_string(),
                    )
                }
            },
            AuthError::Http(_) => {
                tracing::error!("HTTP error during auth: {}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    "Authentication provider error".to_string(),
                )
            }
            AuthError::Config(_) => {
                tracing::error!("Config error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AuthError::InvalidBody(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AuthError::ProviderNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication is not configured".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
