use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verified caller identity extracted from a valid session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity provider's unique user identifier (`sub`).
    pub subject: String,
    /// `cognito:username` when present.
    pub username: Option<String>,
    pub email: Option<String>,
    /// Token expiry (`exp`).
    pub expires_at: DateTime<Utc>,
    /// All verified claims, untouched.
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// Why the authorizer refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoToken,
    Invalid,
    Expired,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoToken => write!(f, "no_token"),
            Self::Invalid => write!(f, "invalid"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Outcome of a single authorizer invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    Allow(Principal),
    Deny(DenyReason),
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Allow(principal) => Some(principal),
            Self::Deny(_) => None,
        }
    }
}

/// Access level declared for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    Public,
    TokenAuthorized,
    ApiKeyRequired,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::TokenAuthorized => write!(f, "token_authorized"),
            Self::ApiKeyRequired => write!(f, "api_key_required"),
        }
    }
}

/// Answer of the API-key quota gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// Key admitted; `usage` is the key's call count including this one.
    Allow { usage: u64 },
    Deny,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmSignUpRequest {
    pub username: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Tokens returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// The token carried in the session cookie.
    pub id_token: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds as reported by the provider.
    pub expires_in: Option<i64>,
}
