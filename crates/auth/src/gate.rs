//! Access policy gate.
//!
//! Evaluates an endpoint's declared [`AccessLevel`] against a request before
//! any handler runs.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use moviedb_core::auth::{AccessLevel, ApiKeyGate, AuthDecision, DenyReason, Principal, QuotaDecision};
use serde_json::json;

use crate::api_key::api_key_from_headers;
use crate::authorizer::SessionAuthorizer;

/// A request let through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Public,
    Token(Principal),
    ApiKey { usage: u64 },
}

/// A request turned away by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unauthorized(DenyReason),
    Forbidden,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden => "Forbidden",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.message() }))).into_response()
    }
}

#[derive(Clone)]
pub struct AccessGate {
    authorizer: Arc<SessionAuthorizer>,
    api_keys: Arc<dyn ApiKeyGate>,
}

impl AccessGate {
    pub fn new(authorizer: Arc<SessionAuthorizer>, api_keys: Arc<dyn ApiKeyGate>) -> Self {
        Self {
            authorizer,
            api_keys,
        }
    }

    pub fn evaluate(
        &self,
        level: AccessLevel,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> Result<Admission, Rejection> {
        match level {
            AccessLevel::Public => Ok(Admission::Public),
            AccessLevel::TokenAuthorized => match self.authorizer.authorize(headers, now) {
                AuthDecision::Allow(principal) => Ok(Admission::Token(principal)),
                AuthDecision::Deny(reason) => Err(Rejection::Unauthorized(reason)),
            },
            AccessLevel::ApiKeyRequired => {
                match self.api_keys.check(api_key_from_headers(headers)) {
                    QuotaDecision::Allow { usage } => Ok(Admission::ApiKey { usage }),
                    QuotaDecision::Deny => Err(Rejection::Forbidden),
                }
            }
        }
    }
}
