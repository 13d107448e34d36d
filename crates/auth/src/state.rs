//! Application state for auth.

use std::sync::Arc;

use axum::extract::FromRef;
use moviedb_core::auth::{AccessLevel, IdentityProvider};

use crate::api_key::StaticApiKeyGate;
use crate::authorizer::SessionAuthorizer;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::gate::AccessGate;
use crate::jwks::KeyStore;
use crate::middleware::EndpointAccess;
use crate::providers::CognitoProvider;

/// Shared state for auth handlers and the access gate.
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub gate: AccessGate,
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl AuthState {
    /// Loads key material and builds the identity provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if no signing keys can be loaded.
    pub async fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Config(format!("failed to build HTTP client: {e}")))?;

        let keys = KeyStore::load(&config, &http_client).await?;
        tracing::info!(keys = keys.len(), "Signing keys loaded");

        let provider: Option<Arc<dyn IdentityProvider>> = match &config.client_id {
            Some(client_id) => Some(Arc::new(CognitoProvider::new(
                http_client,
                config.identity_endpoint(),
                client_id.clone(),
            ))),
            None => {
                tracing::warn!("CLIENT_ID not set, /auth routes are disabled");
                None
            }
        };

        Ok(Self::from_parts(config, keys, provider))
    }

    /// Builds state from already loaded parts.
    pub fn from_parts(
        config: AuthConfig,
        keys: KeyStore,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let authorizer = Arc::new(SessionAuthorizer::new(keys, &config));
        let api_keys = Arc::new(StaticApiKeyGate::new(config.api_keys.clone()));
        tracing::info!(
            api_keys = config.api_keys.len(),
            rate_limit = config.usage_plan.rate_limit,
            burst_limit = config.usage_plan.burst_limit,
            monthly_quota = config.usage_plan.monthly_quota,
            "API key usage plan"
        );

        Self {
            gate: AccessGate::new(authorizer, api_keys),
            config,
            provider,
        }
    }

    /// Gets the identity provider client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotConfigured` if no provider is enabled.
    pub fn provider(&self) -> Result<&dyn IdentityProvider, AuthError> {
        self.provider
            .as_deref()
            .ok_or(AuthError::ProviderNotConfigured)
    }

    /// Middleware state for a route declared at `level`.
    pub fn access(&self, level: AccessLevel) -> EndpointAccess {
        EndpointAccess::new(self.gate.clone(), level)
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
