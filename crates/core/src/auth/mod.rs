mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{
    classify_provider_error, expiry_from_claim, is_token_expired, session_max_age_seconds,
};
pub use traits::{ApiKeyGate, IdentityProvider, Result};
pub use types::{
    AccessLevel, AuthDecision, ConfirmSignUpRequest, DenyReason, Principal, QuotaDecision,
    SessionTokens, SignInRequest, SignUpRequest,
};
