//! Session token authorizer.
//!
//! Reads the session cookie, verifies the token against the identity
//! provider's signing keys and turns the outcome into an [`AuthDecision`].
//! Never fails: every malformed input is a `Deny`.

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use moviedb_core::auth::{
    expiry_from_claim, is_token_expired, AuthDecision, AuthError, DenyReason, Principal,
};
use serde_json::{Map, Value};

use crate::config::AuthConfig;
use crate::decision_cache::DecisionCache;
use crate::jwks::KeyStore;

type Claims = Map<String, Value>;

pub struct SessionAuthorizer {
    keys: KeyStore,
    validation: Validation,
    cookie_name: String,
    token_use: Option<String>,
    cache: Option<DecisionCache>,
}

impl SessionAuthorizer {
    pub fn new(keys: KeyStore, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // Expiry is checked against the caller-supplied clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = config.issuer() {
            validation.set_issuer(&[issuer]);
        }
        match &config.client_id {
            Some(client_id) => validation.set_audience(&[client_id]),
            None => validation.validate_aud = false,
        }

        let cache = DecisionCache::new(
            config.decision_cache_ttl_seconds,
            config.decision_cache_max_entries,
        );
        if cache.is_some() {
            tracing::info!(
                ttl_seconds = config.decision_cache_ttl_seconds,
                max_entries = config.decision_cache_max_entries,
                "Authorizer decision cache enabled"
            );
        }

        Self {
            keys,
            validation,
            cookie_name: config.cookie_name.clone(),
            token_use: config.token_use.clone(),
            cache,
        }
    }

    /// Decides whether the request carries a valid session token at `now`.
    pub fn authorize(&self, headers: &HeaderMap, now: DateTime<Utc>) -> AuthDecision {
        let Some(token) = session_token(headers, &self.cookie_name) else {
            return AuthDecision::Deny(DenyReason::NoToken);
        };

        if let Some(cache) = &self.cache {
            if let Some(decision) = cache.get(&token, now) {
                tracing::trace!("Authorizer decision served from cache");
                return decision;
            }
        }

        let decision = match self.verify(&token, now) {
            Ok(principal) => AuthDecision::Allow(principal),
            Err(AuthError::TokenExpired) => AuthDecision::Deny(DenyReason::Expired),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                AuthDecision::Deny(DenyReason::Invalid)
            }
        };

        if let Some(cache) = &self.cache {
            cache.put(&token, &decision, now);
        }
        decision
    }

    /// Verifies a raw token: header, key, signature, issuer, audience,
    /// `token_use` and finally expiry.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidToken(format!("invalid JWT header: {e}")))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "unsupported JWT alg {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("JWT header missing kid".to_string()))?;

        let key = self
            .keys
            .decoding_key(&kid)
            .ok_or_else(|| AuthError::InvalidToken(format!("unknown kid {kid}")))?;

        let claims = decode::<Claims>(token, &key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if let Some(expected) = &self.token_use {
            let actual = claims.get("token_use").and_then(Value::as_str);
            if actual != Some(expected.as_str()) {
                return Err(AuthError::InvalidToken(format!(
                    "token_use {actual:?} is not {expected}"
                )));
            }
        }

        let exp = claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or_else(|| AuthError::MissingClaim("exp".to_string()))?;
        let expires_at = expiry_from_claim(exp)?;
        if is_token_expired(expires_at, now) {
            return Err(AuthError::TokenExpired);
        }

        let subject = claim_string(&claims, "sub")
            .ok_or_else(|| AuthError::MissingClaim("sub".to_string()))?;
        let username =
            claim_string(&claims, "cognito:username").or_else(|| claim_string(&claims, "username"));
        let email = claim_string(&claims, "email");

        Ok(Principal {
            subject,
            username,
            email,
            expires_at,
            claims,
        })
    }
}

/// The raw session cookie value, if present and non-empty.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn claim_string(claims: &Claims, name: &str) -> Option<String> {
    claims
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
