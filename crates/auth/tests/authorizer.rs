use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use moviedb_auth::{AuthConfig, KeyStore, SessionAuthorizer};
use moviedb_core::auth::{AuthDecision, DenyReason};
use serde_json::{json, Value};

const ISSUER: &str = "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_test";
const CLIENT_ID: &str = "client-1";
const EXP: i64 = 2_000_000_000;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap()
}

fn config() -> AuthConfig {
    AuthConfig {
        user_pool_id: Some("eu-west-1_test".to_string()),
        client_id: Some(CLIENT_ID.to_string()),
        ..AuthConfig::default()
    }
}

fn authorizer_with(config: &AuthConfig) -> SessionAuthorizer {
    let keys = KeyStore::from_json(include_str!("fixtures/test_jwks.json")).unwrap();
    SessionAuthorizer::new(keys, config)
}

fn authorizer() -> SessionAuthorizer {
    authorizer_with(&config())
}

fn claims() -> Value {
    json!({
        "sub": "user-123",
        "iss": ISSUER,
        "aud": CLIENT_ID,
        "token_use": "id",
        "cognito:username": "alice",
        "email": "alice@example.com",
        "iat": 1_600_000_000,
        "exp": EXP,
    })
}

fn mint(claims: &Value, pem: &[u8], kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    encode(&header, claims, &EncodingKey::from_rsa_pem(pem).unwrap()).unwrap()
}

fn mint_valid(claims: &Value) -> String {
    mint(claims, include_bytes!("fixtures/test_rsa_private.pem"), "test-kid")
}

fn cookie_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, format!("token={token}").parse().unwrap());
    headers
}

#[test]
fn test_missing_cookie_is_denied_with_no_token() {
    let decision = authorizer().authorize(&HeaderMap::new(), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::NoToken));
}

#[test]
fn test_valid_token_is_allowed_with_principal() {
    let token = mint_valid(&claims());
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));

    let principal = decision.principal().expect("allowed");
    assert_eq!(principal.subject, "user-123");
    assert_eq!(principal.username.as_deref(), Some("alice"));
    assert_eq!(principal.email.as_deref(), Some("alice@example.com"));
    assert_eq!(principal.expires_at, at(EXP));
    assert_eq!(principal.claims["token_use"], "id");
}

#[test]
fn test_same_token_after_expiry_is_denied_expired() {
    let token = mint_valid(&claims());
    let authorizer = authorizer();

    assert!(authorizer
        .authorize(&cookie_headers(&token), at(EXP - 1))
        .is_allowed());
    assert_eq!(
        authorizer.authorize(&cookie_headers(&token), at(EXP)),
        AuthDecision::Deny(DenyReason::Expired)
    );
}

#[test]
fn test_token_signed_by_unrelated_key_is_invalid() {
    let token = mint(
        &claims(),
        include_bytes!("fixtures/unrelated_rsa_private.pem"),
        "test-kid",
    );
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_unknown_kid_is_invalid() {
    let token = mint(
        &claims(),
        include_bytes!("fixtures/test_rsa_private.pem"),
        "other-kid",
    );
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_wrong_issuer_is_invalid() {
    let mut claims = claims();
    claims["iss"] = json!("https://evil.example.com");
    let token = mint_valid(&claims);
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_wrong_audience_is_invalid() {
    let mut claims = claims();
    claims["aud"] = json!("another-client");
    let token = mint_valid(&claims);
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_access_token_is_rejected_when_id_token_required() {
    let mut claims = claims();
    claims["token_use"] = json!("access");
    let token = mint_valid(&claims);
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_token_use_check_can_be_disabled() {
    let mut claims = claims();
    claims["token_use"] = json!("access");
    let token = mint_valid(&claims);
    let config = AuthConfig {
        token_use: None,
        ..config()
    };
    let decision = authorizer_with(&config).authorize(&cookie_headers(&token), at(1_700_000_000));
    assert!(decision.is_allowed());
}

#[test]
fn test_missing_subject_is_invalid() {
    let mut claims = claims();
    claims.as_object_mut().unwrap().remove("sub");
    let token = mint_valid(&claims);
    let decision = authorizer().authorize(&cookie_headers(&token), at(1_700_000_000));
    assert_eq!(decision, AuthDecision::Deny(DenyReason::Invalid));
}

#[test]
fn test_custom_cookie_name_is_honored() {
    let token = mint_valid(&claims());
    let config = AuthConfig {
        cookie_name: "session".to_string(),
        ..config()
    };
    let authorizer = authorizer_with(&config);

    assert_eq!(
        authorizer.authorize(&cookie_headers(&token), at(1_700_000_000)),
        AuthDecision::Deny(DenyReason::NoToken)
    );

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, format!("session={token}").parse().unwrap());
    assert!(authorizer.authorize(&headers, at(1_700_000_000)).is_allowed());
}

#[test]
fn test_cached_allow_expires_with_token() {
    let token = mint_valid(&claims());
    let config = AuthConfig {
        decision_cache_ttl_seconds: 3600,
        ..config()
    };
    let authorizer = authorizer_with(&config);

    assert!(authorizer
        .authorize(&cookie_headers(&token), at(EXP - 10))
        .is_allowed());
    assert_eq!(
        authorizer.authorize(&cookie_headers(&token), at(EXP)),
        AuthDecision::Deny(DenyReason::Expired)
    );
}
