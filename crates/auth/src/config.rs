use std::collections::HashSet;

/// Usage-plan figures attached to API keys.
///
/// Carried for operators and logged at startup; the gate does not enforce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsagePlan {
    pub rate_limit: u32,
    pub burst_limit: u32,
    pub monthly_quota: u64,
}

impl Default for UsagePlan {
    fn default() -> Self {
        Self {
            rate_limit: 10,
            burst_limit: 2,
            monthly_quota: 10_000,
        }
    }
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub region: String,
    pub user_pool_id: Option<String>,
    pub client_id: Option<String>,
    /// Inline JWKS document; takes precedence over the derived JWKS URL.
    pub jwks_json: Option<String>,
    pub issuer: Option<String>,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Required `token_use` claim. `None` disables the check.
    pub token_use: Option<String>,
    pub decision_cache_ttl_seconds: u64,
    pub decision_cache_max_entries: usize,
    pub api_keys: HashSet<String>,
    pub usage_plan: UsagePlan,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            region: "eu-west-1".to_string(),
            user_pool_id: None,
            client_id: None,
            jwks_json: None,
            issuer: None,
            cookie_name: "token".to_string(),
            cookie_secure: true,
            token_use: Some("id".to_string()),
            decision_cache_ttl_seconds: 0,
            decision_cache_max_entries: 1000,
            api_keys: HashSet::new(),
            usage_plan: UsagePlan::default(),
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `REGION`: Identity provider region (default: `eu-west-1`)
    /// - `USER_POOL_ID`: User pool id, derives the issuer and JWKS URL
    /// - `CLIENT_ID`: App client id, checked as token audience
    /// - `AUTH_JWKS_JSON`: Inline JWKS document
    /// - `AUTH_ISSUER`: Explicit issuer override
    /// - `AUTH_COOKIE_NAME`: Session cookie name (default: `token`)
    /// - `AUTH_TOKEN_USE`: Required `token_use` claim, empty disables (default: `id`)
    /// - `AUTH_DECISION_CACHE_TTL_SECONDS`: Decision cache TTL, 0 disables (default: 0)
    /// - `AUTH_DECISION_CACHE_MAX_ENTRIES`: Decision cache size (default: 1000)
    /// - `API_KEYS`: Comma-separated admitted API keys
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let token_use = match std::env::var("AUTH_TOKEN_USE") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value.trim().to_string()),
            Err(_) => defaults.token_use,
        };

        let api_keys = std::env::var("API_KEYS")
            .map(|keys| parse_api_keys(&keys))
            .unwrap_or_default();

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Self {
            region: std::env::var("REGION").unwrap_or(defaults.region),
            user_pool_id: non_empty_var("USER_POOL_ID"),
            client_id: non_empty_var("CLIENT_ID"),
            jwks_json: non_empty_var("AUTH_JWKS_JSON"),
            issuer: non_empty_var("AUTH_ISSUER"),
            cookie_name: std::env::var("AUTH_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            cookie_secure,
            token_use,
            decision_cache_ttl_seconds: std::env::var("AUTH_DECISION_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.decision_cache_ttl_seconds),
            decision_cache_max_entries: std::env::var("AUTH_DECISION_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.decision_cache_max_entries),
            api_keys,
            usage_plan: defaults.usage_plan,
        }
    }

    /// Token issuer: the explicit override, else derived from the user pool.
    pub fn issuer(&self) -> Option<String> {
        if let Some(issuer) = &self.issuer {
            return Some(issuer.clone());
        }
        self.user_pool_id.as_ref().map(|pool| {
            format!("https://cognito-idp.{}.amazonaws.com/{}", self.region, pool)
        })
    }

    pub fn jwks_url(&self) -> Option<String> {
        self.issuer()
            .map(|issuer| format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/')))
    }

    /// Identity provider JSON API endpoint.
    pub fn identity_endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_api_keys(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}
