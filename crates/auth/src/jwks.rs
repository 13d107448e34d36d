//! Identity provider signing keys, loaded once per process.

use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;

use crate::config::AuthConfig;
use crate::error::AuthError;

const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable set of public signing keys.
#[derive(Debug, Clone)]
pub struct KeyStore {
    jwks: JwkSet,
}

impl KeyStore {
    pub fn new(jwks: JwkSet) -> Self {
        Self { jwks }
    }

    /// Parses an inline JWKS document.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let jwks = serde_json::from_str::<JwkSet>(json)
            .map_err(|e| AuthError::Config(format!("AUTH_JWKS_JSON is not valid JWKS: {e}")))?;
        Ok(Self::new(jwks))
    }

    /// Fetches the JWKS document from `url`.
    pub async fn fetch(http: &reqwest::Client, url: &str) -> Result<Self, AuthError> {
        let jwks = http
            .get(url)
            .timeout(JWKS_FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::Http(format!("failed to fetch JWKS: {e}")))?
            .error_for_status()
            .map_err(|e| AuthError::Http(format!("JWKS endpoint returned {e}")))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::Http(format!("failed to parse JWKS JSON: {e}")))?;
        Ok(Self::new(jwks))
    }

    /// Loads key material from configuration: inline JSON first, else the
    /// JWKS URL derived from the user pool.
    pub async fn load(config: &AuthConfig, http: &reqwest::Client) -> Result<Self, AuthError> {
        if let Some(json) = &config.jwks_json {
            tracing::info!("Loading signing keys from AUTH_JWKS_JSON");
            return Self::from_json(json);
        }

        let url = config.jwks_url().ok_or_else(|| {
            AuthError::Config("USER_POOL_ID or AUTH_JWKS_JSON is required".to_string())
        })?;
        tracing::info!(url = %url, "Fetching signing keys");
        Self::fetch(http, &url).await
    }

    pub fn decoding_key(&self, kid: &str) -> Option<DecodingKey> {
        let jwk = self.jwks.find(kid)?;
        match DecodingKey::from_jwk(jwk) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!(kid = %kid, error = %e, "Unusable JWK");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.jwks.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jwks.keys.is_empty()
    }
}
