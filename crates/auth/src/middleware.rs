//! Axum middleware and extractors applying the access gate per route.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use moviedb_core::auth::{AccessLevel, DenyReason, Principal};

use crate::gate::{AccessGate, Admission, Rejection};

/// Gate plus the access level declared for one route.
#[derive(Clone)]
pub struct EndpointAccess {
    pub gate: AccessGate,
    pub level: AccessLevel,
}

impl EndpointAccess {
    pub fn new(gate: AccessGate, level: AccessLevel) -> Self {
        Self { gate, level }
    }
}

/// Middleware evaluating the route's access level.
///
/// On rejection the inner handler never runs. On admission with a session
/// token the [`Principal`] is stored in request extensions.
pub async fn enforce_access(
    State(access): State<EndpointAccess>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match access
        .gate
        .evaluate(access.level, request.headers(), Utc::now())
    {
        Ok(Admission::Token(principal)) => {
            tracing::debug!(subject = %principal.subject, "Session token accepted");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Ok(Admission::ApiKey { usage }) => {
            tracing::debug!(usage, "API key accepted");
            next.run(request).await
        }
        Ok(Admission::Public) => next.run(request).await,
        Err(rejection) => {
            match rejection {
                Rejection::Unauthorized(reason) => tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    reason = %reason,
                    "Request denied: session token"
                ),
                Rejection::Forbidden => tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Request denied: API key"
                ),
            }
            rejection.into_response()
        }
    }
}

/// Extractor for the principal admitted by [`enforce_access`].
/// Returns 401 if the route was not gated by a session token.
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or(Rejection::Unauthorized(DenyReason::NoToken))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use axum::{
        http::StatusCode,
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::api_key::{StaticApiKeyGate, API_KEY_HEADER};
    use crate::authorizer::SessionAuthorizer;
    use crate::config::AuthConfig;
    use crate::jwks::KeyStore;

    fn gate() -> AccessGate {
        let keys = KeyStore::from_json(include_str!("../tests/fixtures/test_jwks.json")).unwrap();
        let authorizer = Arc::new(SessionAuthorizer::new(keys, &AuthConfig::default()));
        let api_keys = Arc::new(StaticApiKeyGate::new(HashSet::from(["key-1".to_string()])));
        AccessGate::new(authorizer, api_keys)
    }

    async fn whoami(CurrentPrincipal(principal): CurrentPrincipal) -> String {
        principal.subject
    }

    fn principal() -> Principal {
        Principal {
            subject: "user-1".to_string(),
            username: None,
            email: None,
            expires_at: Utc::now(),
            claims: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_current_principal_reads_extensions() {
        let mut request = Request::new(());
        request.extensions_mut().insert(principal());
        let (mut parts, _) = request.into_parts();

        let CurrentPrincipal(found) = CurrentPrincipal::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(found.subject, "user-1");
    }

    #[tokio::test]
    async fn test_current_principal_without_token_admission_is_unauthorized() {
        let access = EndpointAccess::new(gate(), AccessLevel::ApiKeyRequired);
        let app = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(access, enforce_access));

        let request = Request::builder()
            .uri("/whoami")
            .header(API_KEY_HEADER, "key-1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_token_level_route_without_cookie_never_runs_handler() {
        let access = EndpointAccess::new(gate(), AccessLevel::TokenAuthorized);
        let app = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(from_fn_with_state(access, enforce_access));

        let request = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
