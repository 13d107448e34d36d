use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("session token expired")]
    TokenExpired,

    #[error("missing required claim: {0}")]
    MissingClaim(String),

    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("user is not confirmed: {0}")]
    UserNotConfirmed(String),

    #[error("{code}: {message}")]
    InvalidRequest { code: String, message: String },

    #[error("provider error: {0}")]
    Provider(String),
}
