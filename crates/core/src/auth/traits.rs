use async_trait::async_trait;

use super::{
    AuthError, ConfirmSignUpRequest, QuotaDecision, SessionTokens, SignInRequest, SignUpRequest,
};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over the user directory that issues session tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a new user. Returns whether the user is already confirmed.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<bool>;

    /// Confirms a registration with the code delivered to the user.
    async fn confirm_sign_up(&self, request: &ConfirmSignUpRequest) -> Result<()>;

    /// Exchanges credentials for session tokens.
    async fn sign_in(&self, request: &SignInRequest) -> Result<SessionTokens>;
}

/// External quota gate for write endpoints.
///
/// Implementations answer allow or deny and keep per-key usage counters.
pub trait ApiKeyGate: Send + Sync {
    fn check(&self, api_key: Option<&str>) -> QuotaDecision;
}
