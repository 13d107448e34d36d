//! Application state shared by all request handlers.

use std::sync::Arc;

use moviedb_auth::AuthState;
use moviedb_core::storage::CatalogRepository;

use crate::config::Config;
use crate::engine::CatalogQueryEngine;

/// Shared application state.
///
/// Cloned for each request. The repository handle inside the engine is
/// created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: CatalogQueryEngine,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(repository: Arc<dyn CatalogRepository>, auth: AuthState, config: &Config) -> Self {
        Self {
            engine: CatalogQueryEngine::new(repository, config.store_timeout()),
            auth,
        }
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
