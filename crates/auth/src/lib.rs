//! Session-cookie authorization for moviedb.
//!
//! This crate provides:
//! - The session token authorizer (JWKS-verified cookie tokens)
//! - The API-key gate and the per-route access policy gate
//! - Axum middleware and extractors enforcing declared access levels
//! - Identity provider sign-up and sign-in routes

mod api_key;
mod authorizer;
mod config;
mod decision_cache;
mod error;
mod gate;
mod handlers;
mod jwks;
mod middleware;
mod providers;
mod state;

pub use api_key::{api_key_from_headers, StaticApiKeyGate, API_KEY_HEADER};
pub use authorizer::{session_token, SessionAuthorizer};
pub use config::{AuthConfig, UsagePlan};
pub use decision_cache::DecisionCache;
pub use error::AuthError;
pub use gate::{AccessGate, Admission, Rejection};
pub use handlers::{auth_routes, MessageResponse};
pub use jwks::KeyStore;
pub use middleware::{enforce_access, CurrentPrincipal, EndpointAccess};
pub use providers::CognitoProvider;
pub use state::AuthState;
